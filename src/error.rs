use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubstegoError {
    /// Represents a bit depth outside of the supported [1, 8] range
    #[error("Bit depth must be within [1, 8], but got {0}")]
    InvalidBitDepth(u8),

    /// Represents an embedding channel that is not one of the color channels
    #[error("Color channel must be 0 (red), 1 (green) or 2 (blue), but got {0}")]
    InvalidColorChannel(usize),

    /// Represents a stego target in a lossy image format, which would destroy the LSB plane
    #[error("Output file '{0}' uses a lossy image format, LSB data would not survive re-encoding")]
    UnsupportedOutputFormat(String),

    /// Represents a carrier that is too small for the header and payload bits
    #[error("Not enough space for embedding: {needed} pixels needed, {available} available. Either increase the bit depth or use a bigger cover image")]
    InsufficientCapacity { needed: usize, available: usize },

    /// Represents an internal pack request of more bits than fit into a u32
    #[error("Too many bits, expected a maximum of 32 but got {0}")]
    BitWidthOverflow(usize),

    /// Represents a CRC-32 mismatch on extraction: wrong password, wrong image or corrupted data
    #[error("Data integrity could not be verified")]
    IntegrityFailure,

    /// Represents a secret whose length field would not fit the 31 bit header budget
    #[error("Secret of {0} bytes exceeds the maximum supported payload of 2^31 - 1 bytes")]
    SecretTooLarge(usize),

    /// Represents header bits that do not describe a well-formed header
    #[error("No valid header found, the image may carry no secret or the password is wrong")]
    MalformedHeader,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents an unsupported carrier media, for example a movie file
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an error caused by an invalid filename, for example an empty filename
    #[error("A file with an invalid file name was provided")]
    InvalidFileName,

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("No secret file set")]
    SecretNotSet,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write the target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
