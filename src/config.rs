//! Application configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then command-line
//! overrides applied by `main`. Every section and field is optional in the
//! file.
//!
//! ```toml
//! [playback]
//! speed = 1.5
//! frames_per_step = 16
//! step_duration_ms = 500
//!
//! [hash_table]
//! bucket_count = 7
//!
//! [heap]
//! kind = "max"
//!
//! [data]
//! values = [5, 3, 8, 1, 9]
//! text = "abracadabra"
//! ```

use crate::engine::DEFAULT_FRAMES_PER_STEP;
use crate::generators::{GenerateOptions, Operation};
use crate::structures::array::ArrayModel;
use crate::structures::hash_table::{HashTableModel, DEFAULT_BUCKET_COUNT};
use crate::structures::heap::{BinaryHeapModel, HeapKind};
use crate::structures::huffman::HuffmanTree;
use crate::structures::linked_list::LinkedListModel;
use crate::structures::{Structure, StructureKind};
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Accepted interpolation frame counts
pub const FRAMES_PER_STEP_RANGE: RangeInclusive<u32> = 15..=20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Speed multiplier; durations are divided by it
    pub speed: f32,
    pub frames_per_step: u32,
    pub step_duration_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            speed: 1.0,
            frames_per_step: DEFAULT_FRAMES_PER_STEP,
            step_duration_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashTableConfig {
    pub bucket_count: usize,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        HashTableConfig {
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeapConfig {
    pub kind: HeapKind,
}

/// Initial contents loaded into each structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    pub values: Vec<i32>,
    /// Source text for the Huffman tree
    pub text: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            values: vec![5, 3, 8, 1, 9, 2, 7],
            text: "abracadabra".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub playback: PlaybackConfig,
    pub hash_table: HashTableConfig,
    pub heap: HeapConfig,
    pub data: DataConfig,
}

impl AppConfig {
    /// Read and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges; run again after command-line overrides
    pub fn validate(&self) -> Result<(), ConfigError> {
        let playback = &self.playback;
        if !(playback.speed.is_finite() && playback.speed > 0.0) {
            return Err(ConfigError::invalid(
                "playback.speed",
                format!("{} is not a positive number", playback.speed),
            ));
        }
        if !FRAMES_PER_STEP_RANGE.contains(&playback.frames_per_step) {
            return Err(ConfigError::invalid(
                "playback.frames_per_step",
                format!(
                    "{} is outside {}..={}",
                    playback.frames_per_step,
                    FRAMES_PER_STEP_RANGE.start(),
                    FRAMES_PER_STEP_RANGE.end()
                ),
            ));
        }
        if playback.step_duration_ms == 0 {
            return Err(ConfigError::invalid(
                "playback.step_duration_ms",
                "must be greater than zero",
            ));
        }
        if self.hash_table.bucket_count == 0 {
            return Err(ConfigError::invalid(
                "hash_table.bucket_count",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            step_duration: Duration::from_millis(self.playback.step_duration_ms),
        }
    }

    /// Fresh structure of `kind` loaded with the configured data
    ///
    /// The heap keeps the given order; the Huffman tree starts unbuilt.
    pub fn initial_structure(&self, kind: StructureKind) -> Structure {
        let values = &self.data.values;
        match kind {
            StructureKind::Array => Structure::Array(ArrayModel::new(values)),
            StructureKind::LinkedList => Structure::LinkedList(LinkedListModel::new(values)),
            StructureKind::HashTable => Structure::HashTable(HashTableModel::with_values(
                self.hash_table.bucket_count,
                values,
            )),
            StructureKind::Heap => {
                Structure::Heap(BinaryHeapModel::from_values(self.heap.kind, values))
            }
            StructureKind::Huffman => Structure::Huffman(HuffmanTree::new()),
        }
    }

    /// Operations offered for `current`, parameterised from the configured data
    pub fn operations(&self, current: &Structure) -> Vec<Operation> {
        let values = &self.data.values;
        let probe = values.get(values.len() / 2).copied().unwrap_or(0);
        let fresh = values.iter().max().map_or(1, |m| m.saturating_add(1));
        match current {
            Structure::Array(_) => vec![
                Operation::BubbleSort,
                Operation::SelectionSort,
                Operation::InsertionSort,
                Operation::QuickSort,
                Operation::LinearSearch(probe),
                Operation::BinarySearch(probe),
            ],
            Structure::LinkedList(_) => vec![
                Operation::ListInsertHead(fresh),
                Operation::ListInsertTail(fresh),
                Operation::ListInsertAt {
                    index: 1,
                    value: fresh,
                },
                Operation::ListDeleteHead,
                Operation::ListReverse,
                Operation::ListSearch(probe),
            ],
            Structure::HashTable(_) => vec![
                Operation::HashInsert(fresh),
                Operation::HashSearch(probe),
                Operation::HashDelete(probe),
            ],
            Structure::Heap(_) => vec![
                Operation::HeapBuild,
                Operation::HeapInsert(fresh),
                Operation::HeapExtractRoot,
            ],
            Structure::Huffman(tree) => {
                // Decode whatever the last encode produced
                let bits = if tree.encoded().is_empty() {
                    "0110".to_string()
                } else {
                    tree.encoded().to_string()
                };
                vec![
                    Operation::HuffmanBuild(self.data.text.clone()),
                    Operation::HuffmanEncode(self.data.text.clone()),
                    Operation::HuffmanDecode(bits),
                ]
            }
        }
    }
}
