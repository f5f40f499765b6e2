pub mod source;
pub mod normalizer;
pub mod segmenter;
pub mod sequencer;
pub mod processor;

pub use source::SourceConfig;
pub use normalizer::NormalizerConfig;
pub use segmenter::SegmenterConfig;
pub use sequencer::SequencerConfig;
pub use processor::ProcessorConfig;
