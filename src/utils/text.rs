//! 文本处理工具

/// 取字符串的前 `max_chars` 个字符（按字符而非字节截断）
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// 是否为 emoji 或 emoji 组合用字符
pub fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1FAFF       // 表情、交通、国旗、补充符号等
            | 0x2600..=0x27BF   // 杂项符号、装饰符号
            | 0x2B00..=0x2BFF   // 箭头与几何符号（⭐ 等）
            | 0xFE0F            // 变体选择符
            | 0x200D            // 零宽连接符
            | 0x20E3            // 组合用键帽
    )
}

/// 移除所有 emoji
///
/// 只删除与 emoji 相邻的一个空格，行首缩进保持不变；代码块内的行原样保留
pub fn strip_emoji(text: &str) -> String {
    if !text.chars().any(is_emoji) {
        return text.to_string();
    }

    let mut in_code_block = false;
    let mut lines = Vec::new();
    for line in text.split('\n') {
        if line.trim_start().starts_with("```") {
            in_code_block = !in_code_block;
            lines.push(line.to_string());
        } else if in_code_block || !line.chars().any(is_emoji) {
            lines.push(line.to_string());
        } else {
            lines.push(strip_line_emoji(line));
        }
    }
    lines.join("\n")
}

/// 移除单行中的 emoji
fn strip_line_emoji(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if !is_emoji(c) {
            out.push(c);
            continue;
        }
        while chars.peek().copied().is_some_and(is_emoji) {
            chars.next();
        }

        let has_content = !out.trim().is_empty();
        match chars.peek() {
            // "## 🚀 Title" → "## Title"，"🚀 Title" → "Title"
            Some(' ') if !has_content || out.ends_with(' ') => {
                chars.next();
            }
            // "Done ✅" → "Done"，"Fast ⚡, fun" → "Fast, fun"
            Some(next) if *next != ' ' && has_content && out.ends_with(' ') => {
                out.pop();
            }
            None if has_content && out.ends_with(' ') => {
                out.pop();
            }
            _ => {}
        }
    }
    out
}
