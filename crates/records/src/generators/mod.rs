//! 生成器模块
//!
//! 提供模拟记录的随机生成功能，用于兜底存储的预填充与缺失字段补齐。

pub mod data_generator;

pub use data_generator::{DataGenerator, GeneratorConfig, MockGenerator, Mockable};
