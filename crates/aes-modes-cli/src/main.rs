//! Command-line interface for `aes-modes`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use aes_modes::{
    cbc, ctr_transform, ige, Aes256Key, CtrState, Direction, IgeIv, BLOCK_SIZE, KEY_SIZE,
};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, info};
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// AES-256 chaining modes CLI.
#[derive(Parser)]
#[command(
    name = "aesmodes",
    version,
    author,
    about = "AES-256 in CBC, CTR and IGE modes"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt or decrypt a block-aligned file with AES-256-CBC.
    Cbc {
        /// Decrypt instead of encrypt.
        #[arg(long, default_value_t = false)]
        decrypt: bool,
        /// AES-256 key as 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// 16-byte IV as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        iv_hex: String,
        /// Input file (must be a non-empty multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// XOR a file with the AES-256-CTR keystream (encrypts and decrypts).
    Ctr {
        /// AES-256 key as 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// 16-byte counter block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        iv_hex: String,
        /// Keystream bytes of the current block already consumed (0-15).
        #[arg(long, default_value_t = 0)]
        cursor: u8,
        /// Input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Encrypt or decrypt a block-aligned file with AES-256-IGE.
    Ige {
        /// Decrypt instead of encrypt.
        #[arg(long, default_value_t = false)]
        decrypt: bool,
        /// AES-256 key as 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// 32-byte IV as 64 hex characters.
        #[arg(long, value_name = "HEX")]
        iv_hex: String,
        /// Input file (must be a non-empty multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Run random data through every mode and back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Cbc {
            decrypt,
            key_hex,
            iv_hex,
            input,
            output,
        } => cmd_cbc(direction(decrypt), &key_hex, &iv_hex, &input, &output),
        Commands::Ctr {
            key_hex,
            iv_hex,
            cursor,
            input,
            output,
        } => cmd_ctr(&key_hex, &iv_hex, cursor, &input, &output),
        Commands::Ige {
            decrypt,
            key_hex,
            iv_hex,
            input,
            output,
        } => cmd_ige(direction(decrypt), &key_hex, &iv_hex, &input, &output),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn direction(decrypt: bool) -> Direction {
    if decrypt {
        Direction::Decrypt
    } else {
        Direction::Encrypt
    }
}

fn cmd_cbc(
    direction: Direction,
    key_hex: &str,
    iv_hex: &str,
    input_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let iv = parse_hex::<BLOCK_SIZE>(iv_hex, "IV")?;
    let data = read_input(input_path)?;
    let out = cbc(direction, &data, &key, iv).context("cbc transform")?;
    write_output(output_path, &out.data)?;
    println!("next iv: {}", hex::encode(out.iv));
    Ok(())
}

fn cmd_ctr(
    key_hex: &str,
    iv_hex: &str,
    cursor: u8,
    input_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let iv = parse_hex::<BLOCK_SIZE>(iv_hex, "IV")?;
    let state = CtrState::new(iv, cursor).context("ctr state")?;
    let data = read_input(input_path)?;
    let (out, next) = ctr_transform(&data, &key, state).context("ctr transform")?;
    write_output(output_path, &out)?;
    println!("next iv: {}", hex::encode(next.iv()));
    println!("next cursor: {}", next.cursor());
    Ok(())
}

fn cmd_ige(
    direction: Direction,
    key_hex: &str,
    iv_hex: &str,
    input_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let iv = IgeIv::from(parse_hex::<{ 2 * BLOCK_SIZE }>(iv_hex, "IV")?);
    let data = read_input(input_path)?;
    let out = ige(direction, &data, &key, &iv).context("ige transform")?;
    write_output(output_path, &out)
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key_bytes = [0u8; KEY_SIZE];
    rng.fill_bytes(&mut key_bytes);
    let key = Aes256Key::from(key_bytes);

    let mut iv = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut iv);
    let mut ige_iv = [0u8; 2 * BLOCK_SIZE];
    rng.fill_bytes(&mut ige_iv);
    let ige_iv = IgeIv::from(ige_iv);

    let blocks = rng.gen_range(1..=4);
    let mut plaintext = vec![0u8; blocks * BLOCK_SIZE];
    rng.fill_bytes(&mut plaintext);
    println!("demo key: {}", hex::encode(key_bytes));
    println!("plaintext: {}", hex::encode(&plaintext));

    let cbc_ct = cbc(Direction::Encrypt, &plaintext, &key, iv)?;
    let cbc_pt = cbc(Direction::Decrypt, &cbc_ct.data, &key, iv)?;
    println!("cbc: {}", hex::encode(&cbc_ct.data));

    let ctr_ct = ctr_transform(&plaintext, &key, CtrState::from_iv(iv))?.0;
    let ctr_pt = ctr_transform(&ctr_ct, &key, CtrState::from_iv(iv))?.0;
    println!("ctr: {}", hex::encode(&ctr_ct));

    let ige_ct = ige(Direction::Encrypt, &plaintext, &key, &ige_iv)?;
    let ige_pt = ige(Direction::Decrypt, &ige_ct, &key, &ige_iv)?;
    println!("ige: {}", hex::encode(&ige_ct));

    if cbc_pt.data != plaintext || ctr_pt != plaintext || ige_pt != plaintext {
        bail!("demo roundtrip failed");
    }
    info!("demo roundtrip succeeded for {} bytes", plaintext.len());
    Ok(())
}

fn parse_hex<const N: usize>(hex_str: &str, what: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(hex_str.trim()).with_context(|| format!("decode {what} hex"))?;
    if bytes.len() != N {
        bail!(
            "{what} must be {} bytes ({} hex characters), got {}",
            N,
            2 * N,
            bytes.len()
        );
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

fn parse_key_hex(hex_str: &str) -> Result<Aes256Key> {
    parse_hex::<KEY_SIZE>(hex_str, "AES-256 key").map(Aes256Key::from)
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("write {}", path.display()))?;
    debug!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
