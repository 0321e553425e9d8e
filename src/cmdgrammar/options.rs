//! Parser configuration.
//!
//! Options are a plain bit set handed to the parser; nothing is read from files or the
//! environment.

use bitflags::bitflags;

bitflags! {
    #[derive(Default)]
    pub struct ParserOptions: u64 {
        /// Trace rule and item matching through the `log` facade
        const DEBUG = 1 << 0;
    }
}

impl ParserOptions {
    pub fn debug(self) -> bool {
        self.contains(ParserOptions::DEBUG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_quiet() {
        assert!(!ParserOptions::default().debug());
        assert!(ParserOptions::DEBUG.debug());
        assert_eq!(ParserOptions::from_bits(1), Some(ParserOptions::DEBUG));
    }
}
