// wordlist_migrate/src/report.rs
// Operator facing console messages.

use crate::error::MigrateError;
use crate::extractor::ExtractSummary;
use crate::uploader::UploadSummary;

const RULE_WIDTH: usize = 30;

/// Formats a count with comma thousand separators, e.g. `25,924`.
pub fn group_thousands(n: usize,) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3,);
    for (i, c,) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',',);
        }
        out.push(c,);
    }
    out
}

pub fn extract_started(table: &str,) -> String {
    format!("กำลังดึงข้อมูลจากตาราง {}...", table)
}

pub fn extract_lines(summary: &ExtractSummary,) -> Vec<String,> {
    let rule = "-".repeat(RULE_WIDTH,);
    let expected = group_thousands(summary.expected,);
    let check = if summary.matches_expected() {
        format!("✨ ยอดเยี่ยม! จำนวนคำตรงตามใน Access เป๊ะ ({} คำ)", expected)
    } else {
        format!(
            "⚠️ จำนวนคำ ({}) ยังไม่ตรงกับ {} คำ โปรดเช็กข้อมูลอีกครั้ง",
            summary.written, expected
        )
    };
    vec![
        rule.clone(),
        format!("✅ สกัดข้อมูลสำเร็จทั้งหมด {} คำ", summary.written),
        format!("📄 บันทึกไฟล์ที่ {}", summary.output_path.display()),
        check,
        rule,
    ]
}

pub fn upload_lines(summary: &UploadSummary,) -> Vec<String,> {
    let mut lines = vec![
        format!("🗑️ ลบข้อมูลเก่าออก {} รายการ", summary.deleted),
        format!("✅ อัปโหลดคำศัพท์สำเร็จทั้งหมด {} คำ!", summary.inserted),
    ];
    if let Some(err,) = &summary.index_error {
        lines.push(format!("⚠️ สร้างดัชนีคำศัพท์ไม่สำเร็จ: {}", err),);
    }
    lines
}

pub fn lookup_line(word: &str, found: bool,) -> String {
    if found {
        format!("✅ พบคำว่า \"{}\" ในคลังคำศัพท์", word)
    } else {
        format!("⚠️ ไม่พบคำว่า \"{}\" ในคลังคำศัพท์", word)
    }
}

pub fn prefix_lines(prefix: &str, words: &[String],) -> Vec<String,> {
    let mut lines = vec![format!("🔎 คำที่ขึ้นต้นด้วย \"{}\" ({} คำ)", prefix, words.len())];
    lines.extend(words.iter().map(|w| format!("  {}", w),),);
    lines
}

pub fn failure_line(err: &MigrateError,) -> String {
    format!("❌ เกิดข้อผิดพลาด: {}", err)
}

pub fn print_lines(lines: &[String],) {
    for line in lines {
        println!("{}", line);
    }
}
