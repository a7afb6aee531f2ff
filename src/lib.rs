//! Exam System - 考试管理后端服务
//!
//! 基于 Actix Web 构建，用户、试卷、题目、作答与答案之间的关系
//! 由应用层以「虚拟外键」维护，数据库本身不声明外键约束。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM + 完整性校验 + 重试）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
