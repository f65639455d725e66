//! README 模板拼装
//!
//! 没有已有 README 时，按固定模板确定性地拼出完整文档。模板内容不经过 LLM。

use std::collections::HashMap;

use super::types::Section;

/// 章节模板
fn section_template(section: Section) -> &'static str {
    match section {
        Section::Installation => "## Installation\n\n```bash\nnpm install\n```\n\n",
        Section::Usage => "## Usage\n\n```\n// Example usage\n```\n\n",
        Section::Features => "## Features\n\n- Feature 1\n- Feature 2\n- Feature 3\n\n",
        Section::Contributing => {
            "## Contributing\n\n\
             1. Fork the repository\n\
             2. Create your feature branch (`git checkout -b feature/AmazingFeature`)\n\
             3. Commit your changes (`git commit -m 'Add some AmazingFeature'`)\n\
             4. Push to the branch (`git push origin feature/AmazingFeature`)\n\
             5. Open a Pull Request\n\n"
        }
        Section::License => {
            "## License\n\nThis project is licensed under the MIT License - \
             see the [LICENSE](LICENSE) file for details.\n\n"
        }
        Section::Acknowledgements => {
            "## Acknowledgements\n\n\
             * [Contributor Name](https://github.com/username) - Inspiration/Collaboration\n\n"
        }
    }
}

/// 单个章节的内容
///
/// 有生成内容时使用生成内容，否则使用模板；未知章节只输出标题
fn section_content(name: &str, generated: &HashMap<String, String>) -> String {
    if let Some(body) = generated.get(name) {
        return format!("## {}\n\n{}\n\n", name, body.trim());
    }
    match Section::from_name(name) {
        Some(section) => section_template(section).to_string(),
        None => format!("## {}\n\n", name),
    }
}

/// 拼装完整 README
///
/// 结构：标题 → 描述 → 请求的章节（按给定顺序）→ 必备章节中尚未出现的部分
pub fn assemble_readme(
    project_title: &str,
    summary: &str,
    requested: &[&str],
    generated: &HashMap<String, String>,
) -> String {
    let mut readme = format!("# {}\n\n## Description\n\n{}\n\n", project_title, summary);

    for name in requested {
        readme.push_str(&section_content(name, generated));
    }

    for section in Section::CANONICAL_MISSING {
        let already_added = requested
            .iter()
            .any(|name| Section::from_name(name) == Some(section));
        if !already_added {
            readme.push_str(&section_content(section.as_str(), generated));
        }
    }

    readme
}
