//! # seqscan
//!
//! 在一批带标签的 DNA 序列中做精确模式匹配。
//!
//! 给定模式串、算法（KMP 或 Rabin–Karp）以及 `label,sequence` 格式的记录文件，
//! 返回每条序列上所有匹配起点（0-based，升序，允许重叠）、匹配总数和匹配阶段耗时。
//!
//! ## 快速示例
//!
//! ```rust,no_run
//! use seqscan::invoke::{execute, SearchRequest};
//! use seqscan::report;
//!
//! let result = execute(SearchRequest::new("kmp", "GATTACA", "sequences.csv"))?;
//! println!("{} matches", result.match_count);
//! print!("{}", report::encode_success(&result)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! 也可以直接使用匹配器：
//!
//! ```rust
//! use seqscan::search::{kmp_search, rabin_karp_search};
//!
//! assert_eq!(kmp_search(b"AAAA", b"AA"), vec![0, 1, 2]);
//! assert_eq!(rabin_karp_search(b"AAAA", b"AA"), vec![0, 1, 2]);
//! ```
//!
//! ## 模块说明
//!
//! - [`io`] — 记录文件解析（表头识别、字段与字母表校验）
//! - [`search`] — KMP / Rabin–Karp 匹配器与结果汇总
//! - [`report`] — 成功 / 失败 JSON 输出
//! - [`invoke`] — 调用约定：参数解析、校验、执行
//! - [`error`] — 错误类型与退出码
//! - [`util`] — DNA 字母表工具函数

pub mod error;
pub mod invoke;
pub mod io;
pub mod report;
pub mod search;
pub mod util;

pub use error::{EngineError, ErrorKind};
pub use invoke::{execute, SearchRequest};
pub use search::{AggregateResult, Algorithm, MatchResult};
