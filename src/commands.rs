//! Thin command wrappers around the builder APIs.

use std::path::{Path, PathBuf};

use crate::codec::CodecOptions;
use crate::result::Result;

/// Hide `secret_file` inside `cover` and write the stego image to `output`.
pub fn embed(
    cover: &Path,
    secret_file: &Path,
    output: &Path,
    password: Option<String>,
    options: CodecOptions,
) -> Result<()> {
    crate::api::embed::prepare()
        .with_options(options)
        .with_cover(cover)
        .with_secret_file(secret_file)
        .with_output(output)
        .use_password(password)
        .execute()
}

/// Recover the secret from `stego` and return the path it was written to.
pub fn extract(
    stego: &Path,
    output_folder: Option<&Path>,
    password: Option<String>,
    options: CodecOptions,
) -> Result<PathBuf> {
    let mut api = crate::api::extract::prepare()
        .with_options(options)
        .from_secret_file(stego)
        .using_password(password);

    if let Some(folder) = output_folder {
        api = api.into_output_folder(folder);
    }

    api.execute()
}
