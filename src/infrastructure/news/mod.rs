pub mod broadcast_transcript;
pub mod static_news;

pub use broadcast_transcript::BroadcastTranscriptSource;
pub use static_news::StaticNewsSource;
