//! 技术分类到图标的映射
//!
//! 按优先级顺序排列的关键词桶，分类文本（小写）包含任一关键词即命中，第一个命中的桶生效。

/// 卡片图标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIcon {
    Frontend,
    Backend,
    Database,
    Ops,
    Compute,
    Language,
    Generic,
}

impl CategoryIcon {
    /// 页面上显示的符号
    pub fn glyph(&self) -> &'static str {
        match self {
            CategoryIcon::Frontend => "🌐",
            CategoryIcon::Backend => "🖥",
            CategoryIcon::Database => "🗄",
            CategoryIcon::Ops => "⌨",
            CategoryIcon::Compute => "🧠",
            CategoryIcon::Language => "</>",
            CategoryIcon::Generic => "▤",
        }
    }

    /// CSS 类名后缀
    pub fn slug(&self) -> &'static str {
        match self {
            CategoryIcon::Frontend => "frontend",
            CategoryIcon::Backend => "backend",
            CategoryIcon::Database => "database",
            CategoryIcon::Ops => "ops",
            CategoryIcon::Compute => "compute",
            CategoryIcon::Language => "language",
            CategoryIcon::Generic => "generic",
        }
    }
}

/// 关键词桶（顺序即优先级）
pub const ICON_BUCKETS: &[(&[&str], CategoryIcon)] = &[
    (&["front"], CategoryIcon::Frontend),
    (&["back", "api"], CategoryIcon::Backend),
    (&["data", "store"], CategoryIcon::Database),
    (&["devops", "cloud"], CategoryIcon::Ops),
    (&["ai", "ml"], CategoryIcon::Compute),
    (&["language"], CategoryIcon::Language),
];

/// 根据分类选择图标，未命中时返回 [`CategoryIcon::Generic`]
pub fn icon_for_category(category: &str) -> CategoryIcon {
    let lower = category.to_lowercase();
    ICON_BUCKETS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(*k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(CategoryIcon::Generic)
}
