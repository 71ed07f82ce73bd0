//! Common Framework
//!
//! 词法分析核心与下游消费者（语法分析、诊断渲染）之间共享的位置与文本类型。

pub mod position;
pub mod text_slice;

pub use position::{Position, Source};
pub use text_slice::TextSlice;
