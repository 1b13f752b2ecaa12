use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::carrier::Carrier;
use crate::codec::{self, CodecOptions};
use crate::error::SubstegoError;
use crate::result::Result;

pub fn prepare() -> ExtractApi {
    ExtractApi::default()
}

/// Builder for the end to end extract operation.
#[derive(Default, Debug)]
pub struct ExtractApi {
    stego: Option<PathBuf>,
    output_folder: Option<PathBuf>,
    password: Option<String>,
    options: CodecOptions,
}

impl ExtractApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// The stego image that carries the secret.
    pub fn from_secret_file(mut self, stego: impl AsRef<Path>) -> Self {
        self.stego = Some(stego.as_ref().to_path_buf());
        self
    }

    /// Folder the secret is written into; defaults to the stego image's
    /// directory.
    pub fn into_output_folder(mut self, output_folder: impl AsRef<Path>) -> Self {
        self.output_folder = Some(output_folder.as_ref().to_path_buf());
        self
    }

    /// Color channel the secret was embedded into (0 red, 1 green, 2 blue).
    pub fn with_color_channel(mut self, channel: usize) -> Self {
        self.options.color_channel = channel;
        self
    }

    /// The password used during embedding; `None` reads in row-major order.
    pub fn using_password<S: AsRef<str>>(mut self, password: Option<S>) -> Self {
        self.password = password.map(|s| s.as_ref().to_string());
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    /// Execute the extraction and return the path of the recovered file,
    /// named `[extracted]<original filename>`.
    pub fn execute(self) -> Result<PathBuf> {
        let Some(stego) = self.stego else {
            return Err(SubstegoError::CarrierNotSet);
        };

        let carrier = Carrier::from_file(&stego)?;
        let plane = carrier.plane(self.options.color_channel)?;
        let secret =
            codec::extract_from_plane(&plane, self.password.as_deref().unwrap_or(""))?;

        let folder = self
            .output_folder
            .or_else(|| stego.parent().map(Path::to_path_buf))
            .unwrap_or_default();

        // keep only the basename of whatever name was recovered, an
        // embedded path must not escape the output folder
        let recovered = String::from_utf8_lossy(&secret.file_name).to_string();
        let recovered = Path::new(&recovered)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("secret");

        let target = folder.join(format!("[extracted]{recovered}"));
        fs::write(&target, &secret.data)
            .map_err(|source| SubstegoError::WriteError { source })?;
        info!("Secret extracted to {}", target.display());

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_require_a_stego_image() {
        let result = prepare().execute();
        assert!(matches!(result, Err(SubstegoError::CarrierNotSet)));
    }

    #[test]
    fn should_reject_non_png_stego_files() {
        let result = prepare().from_secret_file("stego.bmp").execute();
        assert!(matches!(result, Err(SubstegoError::UnsupportedMedia)));
    }
}
