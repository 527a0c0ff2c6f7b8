//! String function kernels
//!
//! Organized by category:
//! - Substring: substr, substr_varbinary, trail
//! - Trim: trim, ltrim, rtrim
//! - Pad: lpad, rpad
//! - Search: strpos, strrpos, starts_with, ends_with
//! - Length: length, length_varbinary
//! - Code points: chr, codepoint
//! - Distance: hamming_distance, levenshtein_distance
//! - Normalization: normalize
//! - Hashing: xxhash64

pub mod utf8;

mod codepoint;
mod distance;
mod hash;
mod length;
mod normalize;
mod pad;
mod search;
mod substring;
mod trim;

pub use codepoint::{ChrFunction, CodePointFunction};
pub use distance::{HammingDistanceFunction, LevenshteinDistanceFunction};
pub use hash::XxHash64Function;
pub use length::{LengthFunction, LengthVarbinaryFunction};
pub use normalize::{NormalizationForm, NormalizeFunction};
pub use pad::{PadFunction, PadSide};
pub use search::{EndsWithFunction, SearchDirection, StartsWithFunction, StrPosFunction};
pub use substring::{SubstrFunction, SubstrVarbinaryFunction, TrailFunction};
pub use trim::{TrimFunction, TrimSide};
