//! # Gabarito Submit
//!
//! 批量提交答题卡 PDF 到自动阅卷服务，并把结果导入成绩录入系统
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 与后端交互，只暴露能力
//! - `GradingApi` - 阅卷 / 单条导入 / 批量导入
//! - `HttpGradingClient` - 基于 reqwest 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `ToastCenter` - 通知
//! - `LocalPreview` - 用系统查看器打开 PDF
//! - `FailureWriter` - 写失败清单
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份答题卡"的处理流程和显示
//! - `SheetCtx` - 上下文封装（序号 + 文件名）
//! - `SheetFlow` - 提交 → 判断 → 结果
//! - `FileState` / `view` - 逐文件状态和由它渲染的行、卡片
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 会话、文件接收、顺序批处理
//! - `orchestrator/importer` - 导入成绩录入系统
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{GradingApi, HttpGradingClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{GradingConfig, PendingFile, ProcessingResult};
pub use orchestrator::{BatchSummary, CancelHandle, CorrectionSession, ImportPrompt};
pub use workflow::{FileState, SheetCtx, SheetFlow};
