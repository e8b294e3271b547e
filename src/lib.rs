// Library module for dirhash
// Re-exports the hash module for use in integration tests and the binary

pub mod hash;
