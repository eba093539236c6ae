//! Engine version and feature flags substituted at build time.
//!
//! Set `ARDOT_AR_VERSION` / `ARDOT_AR_FLAGS` in the build environment to
//! override the defaults.

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, digit1, hex_digit1},
    combinator::{all_consuming, map_res, opt},
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{ArError, Result};

pub const AR_VERSION: &str = match option_env!("ARDOT_AR_VERSION") {
    Some(version) => version,
    None => "0.4.4-dev",
};

pub const AR_FLAGS: &str = match option_env!("ARDOT_AR_FLAGS") {
    Some(flags) => flags,
    None => "0",
};

/// `major.minor.patch[-pre]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub pre: Option<String>,
}

impl EngineVersion {
    pub fn parse(input: &str) -> Result<Self> {
        all_consuming(version)(input.trim())
            .map(|(_, version)| version)
            .map_err(|_| ArError::InvalidBuildInfo {
                name: "AR_VERSION",
                value: input.to_string(),
            })
    }

    /// The version this build was compiled with
    pub fn current() -> Result<Self> {
        Self::parse(AR_VERSION)
    }

    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}

/// Feature bitmask, written in decimal or `0x` hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureFlags(pub u32);

impl FeatureFlags {
    pub fn parse(input: &str) -> Result<Self> {
        all_consuming(flags)(input.trim())
            .map(|(_, bits)| FeatureFlags(bits))
            .map_err(|_| ArError::InvalidBuildInfo {
                name: "AR_FLAGS",
                value: input.to_string(),
            })
    }

    pub fn current() -> Result<Self> {
        Self::parse(AR_FLAGS)
    }

    pub fn contains(&self, bit: u32) -> bool {
        self.0 & bit == bit
    }
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>())(input)
}

fn version(input: &str) -> IResult<&str, EngineVersion> {
    let (input, (major, _, minor, _, patch)) =
        tuple((number, char('.'), number, char('.'), number))(input)?;
    let (input, pre) = opt(preceded(
        char('-'),
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '.'),
    ))(input)?;

    Ok((
        input,
        EngineVersion {
            major,
            minor,
            patch,
            pre: pre.map(str::to_string),
        },
    ))
}

fn flags(input: &str) -> IResult<&str, u32> {
    alt((
        preceded(
            tag_no_case("0x"),
            map_res(hex_digit1, |hex: &str| u32::from_str_radix(hex, 16)),
        ),
        number,
    ))(input)
}
