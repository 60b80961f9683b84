mod binary;

pub use binary::SpawnPayload;
