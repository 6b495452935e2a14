/// User-facing strings for one deployment locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub submit_label: &'static str,
    pub submit_success: &'static str,
    pub invalid_date_format: &'static str,
    pub empty_statistics: &'static str,
}

impl Messages {
    pub const EN_US: Messages = Messages {
        submit_label: "Record Expense",
        submit_success: "Expense recorded successfully!",
        invalid_date_format: "Please enter the date as YYYY-MM-DD : hh[am/pm]",
        empty_statistics: "No expenses recorded yet",
    };

    pub const ZH_TW: Messages = Messages {
        submit_label: "記錄支出",
        submit_success: "支出記錄已成功添加！",
        invalid_date_format: "請輸入正確的日期格式：YYYY-MM-DD : hh[am/pm]",
        empty_statistics: "尚無支出記錄",
    };

    pub fn for_locale(tag: &str) -> &'static Messages {
        match tag {
            "zh-TW" | "zh-Hant" | "zh-Hant-TW" => &Self::ZH_TW,
            _ => &Self::EN_US,
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::EN_US
    }
}
