//! Daily HTML briefing.
//!
//! Pure rendering of an [`AnalysisResult`]; nothing here feeds back into the
//! scores.

use crate::application::reporting::highlight::Highlighter;
use crate::domain::analysis::{AnalysisResult, SectorSummary, SubCategoryAnalysis};
use crate::domain::keywords::GroupRole;
use crate::domain::ports::DATE_LABEL_FORMAT;
use chrono::{NaiveDate, NaiveDateTime};
use html_escape::{encode_double_quoted_attribute, encode_text};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt::Write;

/// Sectors shown in the ranking table.
pub const RANKING_LIMIT: usize = 5;

const STYLE: &str = r#"
body { margin: 0; background: #F7FAFC; color: #2D3748; font-family: Inter, system-ui, sans-serif; }
header, footer { background: #FFFFFF; border-bottom: 1px solid #E2E8F0; }
.container { max-width: 1080px; margin: 0 auto; padding: 24px 16px; }
.summary { background: #165DFF; color: #FFFFFF; border-radius: 12px; padding: 24px; margin-bottom: 32px; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 16px; }
.card { background: rgba(255, 255, 255, 0.12); border-radius: 8px; padding: 16px; }
.muted { color: #718096; font-size: 0.875rem; }
.summary .muted { color: rgba(255, 255, 255, 0.8); }
section.panel { background: #FFFFFF; border: 1px solid #EDF2F7; border-radius: 12px; margin-bottom: 32px; overflow: hidden; }
section.panel > h2, section.panel > .body { padding: 16px 24px; margin: 0; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 12px 24px; text-align: left; border-top: 1px solid #EDF2F7; }
.badge { display: inline-block; padding: 2px 8px; border-radius: 999px; font-weight: 600; font-size: 0.75rem; }
.strong { background: #E53E3E1A; color: #E53E3E; }
.medium { background: #ED89361A; color: #ED8936; }
.weak { background: #38A1691A; color: #38A169; }
.negative { background: #805AD51A; color: #805AD5; }
.group { margin-bottom: 24px; }
.sentences { border-left: 2px solid; padding-left: 16px; }
.sentence { background: #F7FAFC; border-radius: 8px; padding: 8px 12px; margin: 8px 0; }
.highlighted { padding: 0 2px; border-radius: 2px; font-weight: 600; }
"#;

/// CSS class for an average strength: strong ≥ 7, medium ≥ 4, weak > 0.
pub fn strength_class(strength: Decimal) -> &'static str {
    if strength >= dec!(7) {
        "strong"
    } else if strength >= dec!(4) {
        "medium"
    } else if strength > Decimal::ZERO {
        "weak"
    } else {
        "negative"
    }
}

/// Mail subject naming the top-ranked sector.
pub fn subject_line(date: NaiveDate, analysis: &AnalysisResult) -> String {
    let top = analysis
        .top_sector()
        .map(|s| s.sector.as_str())
        .unwrap_or("无");
    format!(
        "{} 新闻联播交易核心分析（利好板块：{}）",
        date.format(DATE_LABEL_FORMAT),
        top
    )
}

pub struct HtmlReport;

impl HtmlReport {
    pub fn render(
        raw_text: &str,
        analysis: &AnalysisResult,
        date: NaiveDate,
        generated_at: NaiveDateTime,
    ) -> String {
        let highlighter = Highlighter::from_analysis(analysis);
        let date_label = date.format(DATE_LABEL_FORMAT).to_string();
        let generated = generated_at.format("%Y-%m-%d %H:%M:%S").to_string();

        let mut html = String::new();
        let _ = write!(
            html,
            r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{date} 新闻联播交易分析报告</title>
<style>{STYLE}</style>
</head>
<body>
<header><div class="container">
<h1>{date} 新闻联播交易分析报告</h1>
<p class="muted">生成时间: {generated}</p>
</div></header>
<main class="container">
"#,
            date = date_label,
        );

        Self::summary_cards(&mut html, analysis);
        Self::ranking_table(&mut html, &analysis.sector_summary);
        Self::detail_sections(&mut html, analysis, &highlighter);

        let highlighted_raw = highlighter.highlight(raw_text).replace('\n', "<br>\n");
        let _ = write!(
            html,
            r#"<section class="panel">
<h2>原始新闻内容</h2>
<div class="body"><p class="muted">已高亮显示关键交易信息</p>
<div>{highlighted_raw}</div></div>
</section>
</main>
<footer><div class="container muted">
<p>免责声明：本报告基于新闻联播内容自动分析生成，仅供参考，不构成任何投资建议。</p>
<p>数据更新时间: {generated}</p>
</div></footer>
</body>
</html>
"#
        );
        html
    }

    fn summary_cards(html: &mut String, analysis: &AnalysisResult) {
        let (top_name, top_detail) = match analysis.top_sector() {
            Some(top) => (
                format!(
                    "{} <span class=\"badge strong\">{:.1}分</span>",
                    encode_text(&top.sector),
                    top.avg_strength
                ),
                format!(
                    "提及次数: {}次 | 关联关键词: {}",
                    top.mention_count,
                    encode_text(&top.keywords.join(", "))
                ),
            ),
            None => ("无".to_string(), "无显著利好板块".to_string()),
        };

        let policy_sentences: Vec<&str> = analysis
            .groups_with_role(GroupRole::Highlight)
            .filter(|g| g.strength > Decimal::ZERO)
            .flat_map(|g| g.related_sentences.iter().map(String::as_str))
            .collect();
        let risk_groups: Vec<&SubCategoryAnalysis> = analysis
            .groups_with_role(GroupRole::Risk)
            .filter(|g| g.strength < Decimal::ZERO)
            .collect();
        let risk_sentence = risk_groups
            .iter()
            .flat_map(|g| g.related_sentences.iter())
            .next()
            .map(|s| encode_text(s).into_owned())
            .unwrap_or_else(|| "无显著风险提示".to_string());
        let risk_keywords: Vec<&str> = risk_groups
            .iter()
            .flat_map(|g| g.keywords_found.iter().map(String::as_str))
            .collect();

        let _ = write!(
            html,
            r#"<section class="summary">
<h2>核心交易摘要</h2>
<div class="cards">
<div class="card"><h3>最强利好板块</h3><p>{top_name}</p><p class="muted">{top_detail}</p></div>
<div class="card"><h3>政策重点</h3><p>{policy}</p><p class="muted">强力度政策提及: {policy_count}次</p></div>
<div class="card"><h3>风险提示</h3><p>{risk_sentence}</p><p class="muted">利空关键词: {risk_keywords}</p></div>
</div>
</section>
"#,
            policy = policy_sentences
                .first()
                .map(|s| encode_text(s).into_owned())
                .unwrap_or_else(|| "无显著政策动向".to_string()),
            policy_count = policy_sentences.len(),
            risk_keywords = if risk_keywords.is_empty() {
                "无".to_string()
            } else {
                encode_text(&risk_keywords.join(", ")).into_owned()
            },
        );
    }

    fn ranking_table(html: &mut String, sectors: &[SectorSummary]) {
        html.push_str(
            "<section class=\"panel\">\n<h2>板块利好强度排名</h2>\n<table>\n\
             <thead><tr><th>排名</th><th>板块名称</th><th>利好力度</th><th>提及次数</th><th>核心关键词</th></tr></thead>\n<tbody>\n",
        );
        if sectors.is_empty() {
            html.push_str("<tr><td colspan=\"5\">无相关板块数据</td></tr>\n");
        }
        for (rank, sector) in sectors.iter().take(RANKING_LIMIT).enumerate() {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td><span class=\"badge {}\">{:.1}</span></td><td>{}</td><td>{}</td></tr>",
                rank + 1,
                encode_text(&sector.sector),
                strength_class(sector.avg_strength),
                sector.avg_strength,
                sector.mention_count,
                encode_text(&sector.keywords.join(", "))
            );
        }
        let _ = write!(
            html,
            "</tbody>\n</table>\n<p class=\"body muted\">显示前{} / 共{}个相关板块</p>\n</section>\n",
            RANKING_LIMIT,
            sectors.len()
        );
    }

    fn detail_sections(html: &mut String, analysis: &AnalysisResult, highlighter: &Highlighter) {
        html.push_str("<section class=\"panel\">\n<h2>详细分析</h2>\n");
        for taxonomy in analysis.taxonomies.iter().filter(|t| !t.is_empty()) {
            let _ = writeln!(html, "<div class=\"body\"><h3>{}</h3>", encode_text(&taxonomy.name));

            let mut groups: Vec<&SubCategoryAnalysis> = taxonomy.groups.iter().collect();
            groups.sort_by(|a, b| b.strength.abs().cmp(&a.strength.abs()));

            for group in groups {
                let color = encode_double_quoted_attribute(&group.color);
                let sectors = if group.related_sectors.is_empty() {
                    String::new()
                } else {
                    format!(
                        " <span class=\"muted\">关联板块: {}</span>",
                        encode_text(&group.related_sectors.join(", "))
                    )
                };
                let _ = writeln!(
                    html,
                    "<div class=\"group\"><p><strong style=\"color:{color}\">{}</strong> \
                     <span class=\"badge\" style=\"background-color:{color}20;color:{color}\">力度: {:.1}分</span>{sectors}</p>\
                     <div class=\"sentences\" style=\"border-color:{color}\">",
                    encode_text(&group.name),
                    group.strength,
                );
                for sentence in &group.related_sentences {
                    let _ = writeln!(
                        html,
                        "<p class=\"sentence\">{}</p>",
                        highlighter.highlight(sentence)
                    );
                }
                html.push_str("</div></div>\n");
            }
            html.push_str("</div>\n");
        }
        html.push_str("</section>\n");
    }
}
