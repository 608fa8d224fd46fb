use crate::matching::ProfileField;
use std::collections::HashMap;
use std::sync::OnceLock;

/// What a CSV column feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnTarget {
    Field(ProfileField),
    RecordId,
}

static COLUMN_ALIASES: OnceLock<HashMap<String, ColumnTarget>> = OnceLock::new();

pub(crate) fn column_target(header: &str) -> Option<ColumnTarget> {
    column_aliases().get(&normalize_header(header)).copied()
}

pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "").replace('_', " ");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

fn column_aliases() -> &'static HashMap<String, ColumnTarget> {
    COLUMN_ALIASES.get_or_init(|| {
        use ColumnTarget::{Field, RecordId};

        const ALIASES: &[(&str, ColumnTarget)] = &[
            ("student_id", RecordId),
            ("item_id", RecordId),
            ("id", RecordId),
            ("track", Field(ProfileField::Track)),
            ("application_choice", Field(ProfileField::Track)),
            ("application type", Field(ProfileField::Track)),
            ("申请类型", Field(ProfileField::Track)),
            ("academic_percentage", Field(ProfileField::AcademicPercentage)),
            ("academic score", Field(ProfileField::AcademicPercentage)),
            ("学术成绩", Field(ProfileField::AcademicPercentage)),
            ("gaokao_score", Field(ProfileField::GaokaoScore)),
            ("gaokao", Field(ProfileField::GaokaoScore)),
            ("高考成绩", Field(ProfileField::GaokaoScore)),
            ("ielts_score", Field(ProfileField::IeltsScore)),
            ("ielts", Field(ProfileField::IeltsScore)),
            ("雅思成绩", Field(ProfileField::IeltsScore)),
            ("toefl_score", Field(ProfileField::ToeflScore)),
            ("toefl", Field(ProfileField::ToeflScore)),
            ("托福成绩", Field(ProfileField::ToeflScore)),
            ("det_score", Field(ProfileField::DetScore)),
            ("det", Field(ProfileField::DetScore)),
            ("duolingo", Field(ProfileField::DetScore)),
            ("DET成绩", Field(ProfileField::DetScore)),
            ("language_pass", Field(ProfileField::LanguagePass)),
            ("language test passed", Field(ProfileField::LanguagePass)),
            ("通过语言测试", Field(ProfileField::LanguagePass)),
            ("has_high_school_cert", Field(ProfileField::HasHighSchoolCert)),
            ("high school certificate", Field(ProfileField::HasHighSchoolCert)),
            ("拥有高中毕业证书", Field(ProfileField::HasHighSchoolCert)),
            (
                "has_international_school_experience",
                Field(ProfileField::HasInternationalSchoolExperience),
            ),
            (
                "international school experience",
                Field(ProfileField::HasInternationalSchoolExperience),
            ),
            ("有国际学校经验", Field(ProfileField::HasInternationalSchoolExperience)),
            ("budget_per_year", Field(ProfileField::BudgetPerYear)),
            ("annual budget", Field(ProfileField::BudgetPerYear)),
            ("budget", Field(ProfileField::BudgetPerYear)),
            ("年度预算", Field(ProfileField::BudgetPerYear)),
        ];

        let mut map = HashMap::with_capacity(ALIASES.len());
        for (alias, target) in ALIASES {
            map.insert(normalize_header(alias), *target);
        }
        map
    })
}

/// Record-store display labels for each profile field.
pub(crate) const RECORD_STORE_LABELS: &[(ProfileField, &str)] = &[
    (ProfileField::Track, "申请类型"),
    (ProfileField::AcademicPercentage, "学术成绩"),
    (ProfileField::GaokaoScore, "高考成绩"),
    (ProfileField::IeltsScore, "雅思成绩"),
    (ProfileField::ToeflScore, "托福成绩"),
    (ProfileField::DetScore, "DET成绩"),
    (ProfileField::LanguagePass, "通过语言测试"),
    (ProfileField::HasHighSchoolCert, "拥有高中毕业证书"),
    (
        ProfileField::HasInternationalSchoolExperience,
        "有国际学校经验",
    ),
    (ProfileField::BudgetPerYear, "年度预算"),
];
