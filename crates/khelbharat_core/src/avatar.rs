//! Avatar image encoding and initials fallback.
//!
//! # Invariants
//! - Only media types starting with `image/` are accepted.
//! - Stored avatars are self-contained `data:image/*;base64,` URIs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static IMAGE_DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:(image/[A-Za-z0-9.+-]+);base64,([A-Za-z0-9+/]*={0,2})$")
        .expect("valid data uri regex")
});

const INITIALS_FALLBACK: &str = "A";

/// Avatar upload rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarError {
    /// Declared media type is not `image/*`.
    NotAnImage(String),
    /// Upload carried no bytes.
    Empty,
    /// Value is not an image data URI.
    InvalidDataUri,
}

impl Display for AvatarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnImage(media_type) => {
                write!(f, "please select an image file (got `{media_type}`)")
            }
            Self::Empty => write!(f, "image file is empty"),
            Self::InvalidDataUri => write!(f, "avatar must be an image data URI"),
        }
    }
}

impl Error for AvatarError {}

/// Encodes uploaded image bytes as a data URI suitable for storage.
pub fn encode_avatar(media_type: &str, bytes: &[u8]) -> Result<String, AvatarError> {
    let media_type = media_type.trim().to_ascii_lowercase();
    if !media_type.starts_with("image/") || media_type.len() == "image/".len() {
        return Err(AvatarError::NotAnImage(media_type));
    }
    if bytes.is_empty() {
        return Err(AvatarError::Empty);
    }
    Ok(format!("data:{media_type};base64,{}", STANDARD.encode(bytes)))
}

pub fn is_image_data_uri(value: &str) -> bool {
    IMAGE_DATA_URI_RE.is_match(value)
}

/// Splits an image data URI into its media type and decoded bytes.
pub fn decode_avatar(value: &str) -> Result<(String, Vec<u8>), AvatarError> {
    let captures = IMAGE_DATA_URI_RE
        .captures(value)
        .ok_or(AvatarError::InvalidDataUri)?;
    let media_type = captures[1].to_string();
    let bytes = STANDARD
        .decode(&captures[2])
        .map_err(|_| AvatarError::InvalidDataUri)?;
    Ok((media_type, bytes))
}

/// Up to two uppercase initials from whitespace-separated name parts.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        INITIALS_FALLBACK.to_string()
    } else {
        letters
    }
}
