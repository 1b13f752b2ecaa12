use std::fs;
use std::path::{Path, PathBuf};

use crate::carrier::Carrier;
use crate::codec::{self, CodecOptions};
use crate::error::SubstegoError;
use crate::result::Result;
use crate::validation;
use crate::Persist;

pub fn prepare() -> EmbedApi {
    EmbedApi::default()
}

/// Builder for the end to end embed operation.
#[derive(Default, Debug)]
pub struct EmbedApi {
    cover: Option<PathBuf>,
    secret: Option<PathBuf>,
    output: Option<PathBuf>,
    password: Option<String>,
    options: CodecOptions,
}

impl EmbedApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// The carrier image the secret will be hidden in.
    pub fn with_cover<A: AsRef<Path>>(mut self, cover: A) -> Self {
        self.cover = Some(cover.as_ref().to_path_buf());
        self
    }

    /// The file to hide; its basename travels along inside the header.
    pub fn with_secret_file<A: AsRef<Path>>(mut self, secret: A) -> Self {
        self.secret = Some(secret.as_ref().to_path_buf());
        self
    }

    /// Destination of the stego image, must be a lossless format.
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Number of low bits to substitute per payload pixel, in [1, 8].
    pub fn with_bit_depth(mut self, bit_depth: u8) -> Self {
        self.options.bit_depth = bit_depth;
        self
    }

    /// Color channel to embed into for color carriers (0 red, 1 green, 2 blue).
    pub fn with_color_channel(mut self, channel: usize) -> Self {
        self.options.color_channel = channel;
        self
    }

    /// Set the password that scatters the secret across the plane.
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    /// Set the password; `None` embeds sequentially in row-major order.
    pub fn use_password<S: AsRef<str>>(mut self, password: Option<S>) -> Self {
        self.password = password.map(|s| s.as_ref().to_string());
        self
    }

    /// Embed the secret bytes as-is, even when deflate would shrink them.
    pub fn without_compression(mut self) -> Self {
        self.options.compress = false;
        self
    }

    /// Execute the embed and persist the stego image.
    pub fn execute(self) -> Result<()> {
        let Some(cover) = self.cover else {
            return Err(SubstegoError::CarrierNotSet);
        };
        let Some(secret_path) = self.secret else {
            return Err(SubstegoError::SecretNotSet);
        };
        let Some(output) = self.output else {
            return Err(SubstegoError::TargetNotSet);
        };

        validation::bit_depth_range(self.options.bit_depth)?;
        validation::output_format(&output)?;

        let secret =
            fs::read(&secret_path).map_err(|source| SubstegoError::ReadError { source })?;
        let file_name = secret_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or(SubstegoError::InvalidFileName)?;

        let mut carrier = Carrier::from_file(&cover)?;
        let mut plane = carrier.plane(self.options.color_channel)?;

        codec::embed_into_plane(
            &mut plane,
            &secret,
            file_name.as_bytes(),
            self.password.as_deref().unwrap_or(""),
            &self.options,
        )?;

        carrier.merge_plane(&plane, self.options.color_channel)?;
        carrier.save_as(&output)
    }
}
