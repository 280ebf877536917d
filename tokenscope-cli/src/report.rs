//! Markdown rendering of an analysis report

use std::fmt::{self, Write};

use tokenscope_core::{format_usd, MarketValue, ReasonTone};
use tokenscope_runtime::AnalysisReport;

/// Characters of a mention body shown in the report
const EXCERPT_CHARS: usize = 200;

fn price(value: MarketValue) -> String {
    match value {
        MarketValue::Known(v) => format!("${}", v),
        other => other.to_string(),
    }
}

fn usd(value: MarketValue) -> String {
    match value {
        MarketValue::Known(v) => format_usd(v),
        other => other.to_string(),
    }
}

fn liquidity(value: MarketValue) -> String {
    match value {
        MarketValue::NotTrading => "No liquidity".to_string(),
        other => usd(other),
    }
}

fn percent(value: MarketValue) -> String {
    match value {
        MarketValue::Known(v) => format!("{:+.2}%", v),
        other => other.to_string(),
    }
}

fn excerpt(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > EXCERPT_CHARS {
        let cut: String = flat.chars().take(EXCERPT_CHARS).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}

/// Render the report as markdown
pub fn render_markdown(report: &AnalysisReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, report)?;
    Ok(out)
}

fn write_report(out: &mut String, report: &AnalysisReport) -> fmt::Result {
    let meta = &report.metadata;
    let market = &report.market;
    let engagement = &report.engagement;
    let rec = &report.recommendation;

    writeln!(out, "# Token Analysis: {}", meta.name)?;
    writeln!(out)?;
    writeln!(out, "- **Address:** `{}`", report.address)?;
    writeln!(
        out,
        "- **Analyzed:** {}",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out, "- **Run:** {}", report.run_id)?;
    writeln!(out)?;

    writeln!(out, "## Recommendation: {}", rec.label)?;
    writeln!(out)?;
    writeln!(out, "| Score | Risk | Confidence |")?;
    writeln!(out, "|---|---|---|")?;
    writeln!(
        out,
        "| {:.1}/100 | {} | {} |",
        rec.score, rec.risk_level, rec.confidence
    )?;
    writeln!(out)?;
    for reason in &rec.reasons {
        let marker = match reason.tone {
            ReasonTone::Positive => "✅",
            ReasonTone::Caution => "⚠️",
            ReasonTone::Negative => "❌",
        };
        writeln!(out, "- {} {}", marker, reason.message)?;
    }
    writeln!(out)?;

    writeln!(out, "## Token")?;
    writeln!(out)?;
    writeln!(out, "- **Name:** {}", meta.name)?;
    writeln!(out, "- **Symbol:** {}", meta.symbol.as_deref().unwrap_or("Unknown"))?;
    writeln!(out, "- **Decimals:** {}", meta.decimals)?;
    writeln!(out, "- **Supply:** {}", meta.supply.as_deref().unwrap_or("Unknown"))?;
    writeln!(out, "- **Source:** {}", meta.source)?;
    writeln!(out)?;

    writeln!(out, "## Market")?;
    writeln!(out)?;
    writeln!(out, "- **Price:** {}", price(market.price_usd))?;
    writeln!(out, "- **Market cap:** {}", usd(market.market_cap))?;
    writeln!(out, "- **Liquidity:** {}", liquidity(market.liquidity_usd))?;
    writeln!(out, "- **24h volume:** {}", usd(market.volume_24h_usd))?;
    writeln!(out, "- **24h change:** {}", percent(market.price_change_24h_pct))?;
    writeln!(out, "- **DEX:** {}", market.dex.as_deref().unwrap_or("Unknown"))?;
    writeln!(out, "- **Source:** {}", market.source)?;
    writeln!(out)?;

    writeln!(out, "## Social")?;
    writeln!(out)?;
    if !report.search_enabled {
        writeln!(out, "_Search backend not configured; social analysis skipped._")?;
        writeln!(out)?;
    }
    writeln!(
        out,
        "- **Engagement score:** {:.1}/100 ({})",
        engagement.engagement_score, engagement.engagement_level
    )?;
    writeln!(out, "- **Community risk:** {}", engagement.risk_assessment)?;
    writeln!(out, "- **Verified mentions:** {}", engagement.total_mentions)?;
    let totals = engagement.total_engagement;
    writeln!(
        out,
        "- **Engagement:** {} likes, {} reposts, {} replies",
        totals.likes, totals.reposts, totals.replies
    )?;
    writeln!(
        out,
        "- **Sentiment:** {} positive, {} negative",
        engagement.positive_indicators, engagement.negative_indicators
    )?;
    if !engagement.notable_accounts.is_empty() {
        writeln!(
            out,
            "- **Notable accounts:** {}",
            engagement.notable_accounts.join(", ")
        )?;
    }
    writeln!(out)?;

    if !report.mentions.is_empty() {
        writeln!(out, "### Top mentions")?;
        writeln!(out)?;
        for (i, ranked) in report.mentions.iter().enumerate() {
            let mention = &ranked.verified.mention;
            let author = mention.author_handle().unwrap_or("unknown");
            let title = match mention.title.trim() {
                "" => mention.url.as_str(),
                title => title,
            };
            writeln!(
                out,
                "{}. [{}]({}) by {} (relevance {}, verification {})",
                i + 1,
                title,
                mention.url,
                author,
                ranked.relevance,
                ranked.verified.verification_score
            )?;
            let body = excerpt(&mention.body);
            if !body.is_empty() {
                writeln!(out, "   > {}", body)?;
            }
        }
        writeln!(out)?;
    }

    if !report.queries.is_empty() {
        writeln!(out, "### Queries")?;
        writeln!(out)?;
        for query in &report.queries {
            writeln!(out, "- `{}`", query)?;
        }
    }

    Ok(())
}
