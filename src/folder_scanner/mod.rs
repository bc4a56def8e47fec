pub mod collector;
pub mod deduplicator;
pub mod duplicate_set;
pub mod duplicates_group;
pub mod error;
pub mod file_info;
pub mod fixup;
pub mod hasher;
pub mod ignore_list;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod scanner;
