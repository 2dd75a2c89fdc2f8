//! Encrypts and decrypts one message with each mode.

use aes_modes::{
    cbc_decrypt, cbc_encrypt, ige_decrypt, ige_encrypt, Aes256Key, Ctr256, CtrState, IgeIv,
};

fn main() {
    let key = Aes256Key::from([0x2au8; 32]);
    let message = b"sixteen byte blk and a second one";
    let aligned = &message[..32];

    let cbc = cbc_encrypt(aligned, &key, [0u8; 16]).unwrap();
    let plain = cbc_decrypt(&cbc.data, &key, [0u8; 16]).unwrap();
    assert_eq!(plain.data, aligned);
    println!("cbc: {}", hex::encode(&cbc.data));

    let iv = IgeIv::from([0x11u8; 32]);
    let ige = ige_encrypt(aligned, &key, &iv).unwrap();
    assert_eq!(ige_decrypt(&ige, &key, &iv).unwrap(), aligned);
    println!("ige: {}", hex::encode(&ige));

    // CTR takes arbitrary lengths and can be fed in pieces.
    let mut enc = Ctr256::new(key.clone(), CtrState::from_iv([0u8; 16]));
    let mut ctr = enc.apply(&message[..5]).unwrap();
    ctr.extend(enc.apply(&message[5..]).unwrap());
    let mut dec = Ctr256::new(key, CtrState::from_iv([0u8; 16]));
    assert_eq!(dec.apply(&ctr).unwrap(), message);
    println!("ctr: {}", hex::encode(&ctr));
}
