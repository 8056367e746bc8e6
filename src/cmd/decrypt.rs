use super::TextInput;
use cipherforge::api;
use cipherforge::cipher::transposition::ColumnarTransposition;
use cipherforge::error::{CfResult, CipherForgeError};
use cipherforge::key::KeySpec;
use clap::Args;
use fastrand::Rng;

#[derive(Args, Debug, Clone)]
pub struct DecryptArgs {
    #[command(flatten)]
    pub input: TextInput,

    /// Caesar shift (1-25) or 26-letter permutation
    #[arg(short, long)]
    pub key: String,

    /// Columnar transposition keyword used at encryption time
    #[arg(short, long)]
    pub transposition: Option<String>,
}

pub fn run(args: DecryptArgs) -> CfResult<()> {
    let mut text = args.input.read()?;

    let spec: KeySpec = args.key.parse()?;
    if spec == KeySpec::Random {
        return Err(CipherForgeError::MalformedKey(
            "decryption needs an explicit key".to_string(),
        ));
    }
    let key = spec.to_key(&mut Rng::with_seed(0))?;

    // Undo in reverse order of encryption.
    if let Some(keyword) = &args.transposition {
        text = ColumnarTransposition::new(keyword)?.decrypt(&text);
    }

    println!("{}", api::decrypt_message(&text, &key));
    Ok(())
}
