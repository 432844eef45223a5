//! Leave-request form types.
//!
//! The serialized values are the Vietnamese strings the form presents, so a
//! record round-trips unchanged through JSON and the fingerprint sees the
//! exact text a user picked.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LeaveType {
    /// Nghỉ ốm
    #[serde(rename = "Nghỉ ốm")]
    Sick,
    /// Nghỉ phép năm
    #[default]
    #[serde(rename = "Nghỉ phép năm")]
    Vacation,
    /// Nghỉ việc riêng
    #[serde(rename = "Nghỉ việc riêng")]
    Personal,
    /// Nghỉ không lương
    #[serde(rename = "Nghỉ không lương")]
    Unpaid,
    /// Khác
    #[serde(rename = "Khác")]
    Other,
}

impl LeaveType {
    /// The Vietnamese label shown on the form and used in serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Sick => "Nghỉ ốm",
            LeaveType::Vacation => "Nghỉ phép năm",
            LeaveType::Personal => "Nghỉ việc riêng",
            LeaveType::Unpaid => "Nghỉ không lương",
            LeaveType::Other => "Khác",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Register the generated letter should be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Tone {
    /// Thân thiện & Chuyên nghiệp
    #[default]
    #[serde(rename = "Thân thiện & Chuyên nghiệp")]
    FriendlyProfessional,
    /// Trang trọng
    #[serde(rename = "Trang trọng")]
    Formal,
    /// Ngắn gọn & Trực tiếp
    #[serde(rename = "Ngắn gọn & Trực tiếp")]
    Concise,
}

impl Tone {
    /// The Vietnamese label shown on the form and used in serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::FriendlyProfessional => "Thân thiện & Chuyên nghiệp",
            Tone::Formal => "Trang trọng",
            Tone::Concise => "Ngắn gọn & Trực tiếp",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target word count for the generated letter.
///
/// Feeds prompt construction only. It deliberately does NOT participate in
/// the cache fingerprint, so two requests differing only in word limit
/// share a cached letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WordLimit {
    /// Không quy định số từ
    #[default]
    #[serde(rename = "Không quy định số từ")]
    Unlimited,
    /// Đúng 100 từ
    #[serde(rename = "Đúng 100 từ")]
    Words100,
    /// Đúng 150 từ
    #[serde(rename = "Đúng 150 từ")]
    Words150,
    /// Đúng 200 từ
    #[serde(rename = "Đúng 200 từ")]
    Words200,
    /// Đúng 250 từ
    #[serde(rename = "Đúng 250 từ")]
    Words250,
    /// Đúng 300 từ
    #[serde(rename = "Đúng 300 từ")]
    Words300,
}

impl WordLimit {
    /// The Vietnamese label shown on the form and used in serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            WordLimit::Unlimited => "Không quy định số từ",
            WordLimit::Words100 => "Đúng 100 từ",
            WordLimit::Words150 => "Đúng 150 từ",
            WordLimit::Words200 => "Đúng 200 từ",
            WordLimit::Words250 => "Đúng 250 từ",
            WordLimit::Words300 => "Đúng 300 từ",
        }
    }
}

impl fmt::Display for WordLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured leave-request form submission.
///
/// Free-text fields are stored as entered; the cache trims them before
/// key derivation, so surrounding whitespace never splits the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    /// Employee full name.
    pub full_name: String,
    /// Employee position/title.
    pub position: String,
    /// Recipient full name.
    pub recipient_name: String,
    /// Recipient position/title.
    pub recipient_position: String,
    /// Category of leave.
    pub leave_type: LeaveType,
    /// First day of leave, as entered on the form.
    pub start_date: String,
    /// Last day of leave, as entered on the form.
    pub end_date: String,
    /// Reason for the leave.
    pub reason: String,
    /// Free-form extra notes.
    pub notes: String,
    /// Desired letter register.
    pub tone: Tone,
    /// Target word count (prompt-only, not part of the cache key).
    pub word_limit: WordLimit,
    /// Whether the employee offers to stay reachable for remote work.
    pub remote_work: bool,
    /// Whether the employee commits to checking email while away.
    pub check_email: bool,
}
