use std::path::PathBuf;

use ordermgr_sdk::{
    solana_utils::{
        signer::{shared_signer, SignerRef},
        solana_sdk::signature::{read_keypair_file, Keypair},
    },
    Error,
};
use url::Url;

/// Parse url or path.
fn parse_url_or_path(source: &str) -> ordermgr_sdk::Result<Url> {
    let url = match Url::parse(source) {
        Ok(url) => url,
        Err(_) => {
            let path = shellexpand::tilde(source);
            let path = PathBuf::from(path.as_ref());
            let path = std::fs::canonicalize(&path).map_err(|err| {
                Error::configuration(format!("keypair file `{}`: {err}", path.display()))
            })?;
            Url::from_file_path(&path).map_err(|()| {
                Error::configuration(format!("invalid keypair path `{}`", path.display()))
            })?
        }
    };

    Ok(url)
}

/// Load keypair.
///
/// The file holds the secret key as a JSON array of bytes.
pub fn load_keypair(source: &str) -> ordermgr_sdk::Result<Keypair> {
    let url = parse_url_or_path(source)?;

    match url.scheme() {
        "file" => read_keypair_file(url.path())
            .map_err(|err| Error::configuration(format!("keypair file `{source}`: {err}"))),
        other => Err(Error::configuration(format!(
            "{other} scheme is not supported"
        ))),
    }
}

/// Load a shared signer from a path or a `file://` url.
pub fn signer_from_source(source: &str) -> ordermgr_sdk::Result<SignerRef> {
    let keypair = load_keypair(source)?;
    Ok(shared_signer(keypair))
}
