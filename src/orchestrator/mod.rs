//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 持有一次会话的全部状态（文件列表、逐文件状态、通知、统计），
//! 负责调度，不做具体的阅卷判断。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 会话与批处理
//! - 文件接收、去重、移除
//! - 逐个提交（`SequentialQueue`），单个失败不影响后续文件
//! - 汇总通知和统计
//! - 本地预览
//!
//! ### `importer` - 导入成绩录入系统
//! - 单条导入（确认框）
//! - 批量导入
//!
//! ### `queue` - 顺序队列和取消句柄
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor / importer (处理 Vec<TrackedFile>)
//!     ↓
//! workflow::SheetFlow (处理单份答题卡)
//!     ↓
//! services (能力层：notifier / preview / failure_writer)
//!     ↓
//! clients (GradingApi)
//! ```

pub mod batch_processor;
pub mod importer;
pub mod queue;

// 重新导出主要类型
pub use batch_processor::{BatchSummary, CorrectionSession};
pub use importer::ImportPrompt;
pub use queue::{CancelHandle, SequentialQueue};
