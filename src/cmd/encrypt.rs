use super::TextInput;
use cipherforge::api;
use cipherforge::cipher::transposition::ColumnarTransposition;
use cipherforge::error::CfResult;
use cipherforge::key::KeySpec;
use clap::Args;
use fastrand::Rng;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    #[command(flatten)]
    pub input: TextInput,

    /// Caesar shift (1-25) or 26-letter permutation. Omit for a random key.
    #[arg(short, long, default_value = "")]
    pub key: String,

    /// Columnar transposition keyword applied after substitution
    #[arg(short, long)]
    pub transposition: Option<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: EncryptArgs) -> CfResult<()> {
    let text = args.input.read()?;
    let spec: KeySpec = args.key.parse()?;
    let mut rng = args.seed.map(Rng::with_seed).unwrap_or_else(Rng::new);

    let (mut ciphertext, key) = api::encrypt_message(&text, &spec, &mut rng)?;
    info!("🔑 Key: {}", key);

    if let Some(keyword) = &args.transposition {
        let columns = ColumnarTransposition::new(keyword)?;
        ciphertext = columns.encrypt(&ciphertext);
        info!("🔀 Transposed over {} columns", columns.width());
    }

    println!("{}", ciphertext);
    Ok(())
}
