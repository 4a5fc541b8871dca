use std::io::{self, Read, Seek, SeekFrom};

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Hex SHA-256 and length of a request body.
///
/// The body is read to the end and then rewound to where it started, so the
/// bytes sent afterwards are exactly the bytes hashed. `None` hashes zero
/// bytes.
pub fn hash_payload<R>(body: Option<&mut R>) -> Result<(String, u64)>
where
    R: Read + Seek + ?Sized,
{
    let mut hasher = Sha256::new();
    let mut size = 0;

    if let Some(body) = body {
        let start = body.stream_position().map_err(Error::Seek)?;
        size = io::copy(body, &mut hasher).map_err(Error::Hash)?;
        body.seek(SeekFrom::Start(start)).map_err(Error::Seek)?;
    }

    Ok((hex::encode(hasher.finalize()), size))
}
