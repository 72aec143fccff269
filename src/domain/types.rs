// ==========================================
// 海上物流作业排程系统 - 领域类型定义
// ==========================================
// 依据: Marine_Ops_Master_Spec.md - PART A2 红线
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 锁定等级 (Lock Level)
// ==========================================
// 红线: HARD 锁定的作业禁止自动改期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockLevel {
    Hard, // 硬锁定
}

impl fmt::Display for LockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockLevel::Hard => write!(f, "HARD"),
        }
    }
}

// ==========================================
// 钉固强度 (Pin Strength)
// ==========================================
// HARD 钉固等同硬锁定; SOFT 钉固仅在尊重软约束时生效
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PinStrength {
    Hard, // 硬钉固
    Soft, // 软钉固
}

impl fmt::Display for PinStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinStrength::Hard => write!(f, "HARD"),
            PinStrength::Soft => write!(f, "SOFT"),
        }
    }
}

// ==========================================
// 海上作业类别 (Marine Operation Type)
// ==========================================
// 用途: 气象敏感作业识别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarineOpType {
    SailAway, // 拖航离港
    Berthing, // 靠泊
    Loadout,  // 装船
    Loadin,   // 卸船
    Turning,  // 回转就位
    Jackdown, // 降桩
}

impl fmt::Display for MarineOpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarineOpType::SailAway => write!(f, "SAIL_AWAY"),
            MarineOpType::Berthing => write!(f, "BERTHING"),
            MarineOpType::Loadout => write!(f, "LOADOUT"),
            MarineOpType::Loadin => write!(f, "LOADIN"),
            MarineOpType::Turning => write!(f, "TURNING"),
            MarineOpType::Jackdown => write!(f, "JACKDOWN"),
        }
    }
}

impl MarineOpType {
    /// 从字符串解析作业类别
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SAIL_AWAY" => Some(MarineOpType::SailAway),
            "BERTHING" => Some(MarineOpType::Berthing),
            "LOADOUT" => Some(MarineOpType::Loadout),
            "LOADIN" => Some(MarineOpType::Loadin),
            "TURNING" => Some(MarineOpType::Turning),
            "JACKDOWN" => Some(MarineOpType::Jackdown),
            _ => None,
        }
    }
}

// ==========================================
// 冻结/锁定违例原因 (Violation Reason)
// ==========================================
// 红线: 所有被抑制的移动必须输出 reason
// 序列化格式: snake_case (与影响报告 JSON 一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    ActualFrozen,  // 已记录实际日期,永久冻结
    HardLockOrPin, // 硬锁定或硬钉固
    SoftPin,       // 软钉固 (仅在尊重软约束时抑制)
}

impl ViolationReason {
    /// 转换为报告存储的字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationReason::ActualFrozen => "actual_frozen",
            ViolationReason::HardLockOrPin => "hard_lock_or_pin",
            ViolationReason::SoftPin => "soft_pin",
        }
    }

    /// 可读标签 (用于影响报告展示)
    pub fn label(&self) -> &'static str {
        match self {
            ViolationReason::ActualFrozen => "已记录实际开始/结束日期,移动被抑制",
            ViolationReason::HardLockOrPin => "存在硬锁定或硬钉固,移动被抑制",
            ViolationReason::SoftPin => "存在软钉固,按软约束设置抑制移动",
        }
    }
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
