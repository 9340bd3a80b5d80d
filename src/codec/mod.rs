/*
 * Copyright (c) 2003-2023. Trevor Campbell and others.
 *
 * This file is part of Kelpie Flight Route.
 *
 * Kelpie Flight Route is free software; you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation; either version 2 of the License, or
 * (at your option) any later version.
 *
 * Kelpie Flight Route is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Kelpie Flight Route; if not, write to the Free Software
 * Foundation, Inc., 59 Temple Place, Suite 330, Boston, MA  02111-1307  USA
 *
 * Contributors:
 *      Trevor Campbell
 *
 */

//! Big-endian primitives for the binary route file.
//!
//! Everything is written in network byte order. Strings are a u32 byte
//! length followed by UTF-8.

use std::io::{self, Read, Write};

/// Longest string we are prepared to read back. Anything longer is a corrupt
/// length prefix rather than a real property.
const MAX_STRING_LEN: u32 = 1 << 20;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("unexpected end of stream")]
    UnexpectedEof,
    #[error("IO error: {0}")]
    Io(io::Error),
    #[error("unsupported stream version {found}, expected {expected}")]
    Version { expected: u16, found: u16 },
    #[error("string of {0} bytes exceeds limit")]
    StringTooLong(u32),
    #[error("invalid UTF-8 in string: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("unknown value tag {0}")]
    UnknownTag(u8),
    #[error("record does not hold a valid waypoint")]
    InvalidRecord,
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            CodecError::UnexpectedEof
        } else {
            CodecError::Io(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

pub fn write_u8<W: Write>(w: &mut W, v: u8) -> Result<()> {
    w.write_all(&[v])?;
    Ok(())
}

pub fn write_u16<W: Write>(w: &mut W, v: u16) -> Result<()> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

pub fn write_u32<W: Write>(w: &mut W, v: u32) -> Result<()> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

pub fn write_i64<W: Write>(w: &mut W, v: i64) -> Result<()> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

pub fn write_f64<W: Write>(w: &mut W, v: f64) -> Result<()> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

pub fn write_string<W: Write>(w: &mut W, s: &str) -> Result<()> {
    let len = u32::try_from(s.len()).map_err(|_| CodecError::StringTooLong(u32::MAX))?;
    write_u32(w, len)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

pub fn read_u8<R: Read>(r: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

pub fn read_u16<R: Read>(r: &mut R) -> Result<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

pub fn read_u32<R: Read>(r: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

pub fn read_i64<R: Read>(r: &mut R) -> Result<i64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(i64::from_be_bytes(buf))
}

pub fn read_f64<R: Read>(r: &mut R) -> Result<f64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_be_bytes(buf))
}

pub fn read_string<R: Read>(r: &mut R) -> Result<String> {
    let len = read_u32(r)?;
    if len > MAX_STRING_LEN {
        return Err(CodecError::StringTooLong(len));
    }
    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Reads a version tag and checks it against the one we understand.
pub fn expect_version<R: Read>(r: &mut R, expected: u16) -> Result<()> {
    let found = read_u16(r)?;
    if found != expected {
        return Err(CodecError::Version { expected, found });
    }
    Ok(())
}
