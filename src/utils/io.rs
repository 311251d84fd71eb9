// I/O utilities for reading and writing NMF streams
//
// Everything on the wire is little-endian 32-bit words.

use std::io::{self, Read, Seek, SeekFrom, Write};

/// Read a little-endian 32-bit integer
pub fn read_le_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

/// Write a little-endian 32-bit integer
pub fn write_le_u32<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Read exactly `count` little-endian words into an owned buffer
///
/// The allocation is bounded by what the stream actually delivers, so a
/// hostile declared count cannot reserve more memory than the input holds.
pub fn read_words<R: Read>(reader: &mut R, count: u32) -> io::Result<Vec<u32>> {
    let byte_len = count as u64 * 4;
    let mut bytes = Vec::new();
    reader.take(byte_len).read_to_end(&mut bytes)?;
    if bytes.len() as u64 != byte_len {
        return Err(io::ErrorKind::UnexpectedEof.into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Write a slice of little-endian words
pub fn write_words<W: Write>(writer: &mut W, words: &[u32]) -> io::Result<()> {
    for &word in words {
        write_le_u32(writer, word)?;
    }
    Ok(())
}

/// Check whether the stream starts with `signature`, restoring the position
pub fn check_signature<R: Read + Seek>(reader: &mut R, signature: u32) -> io::Result<bool> {
    let pos = reader.stream_position()?;
    let found = read_le_u32(reader);
    reader.seek(SeekFrom::Start(pos))?;
    match found {
        Ok(word) => Ok(word == signature),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_word_round_trip() {
        let mut buffer = Vec::new();
        write_words(&mut buffer, &[0xDEAD_BEEF, 0x0000_0001]).unwrap();
        assert_eq!(buffer, [0xEF, 0xBE, 0xAD, 0xDE, 0x01, 0x00, 0x00, 0x00]);

        let words = read_words(&mut Cursor::new(&buffer), 2).unwrap();
        assert_eq!(words, [0xDEAD_BEEF, 0x0000_0001]);
    }

    #[test]
    fn test_read_words_short_input() {
        let err = read_words(&mut Cursor::new([0u8; 6]), 2).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_check_signature_restores_position() {
        let mut cursor = Cursor::new(0x1234_5678u32.to_le_bytes());
        assert!(check_signature(&mut cursor, 0x1234_5678).unwrap());
        assert!(!check_signature(&mut cursor, 0x0BAD_F00D).unwrap());
        assert_eq!(cursor.stream_position().unwrap(), 0);
    }
}
