//! Per-lab PC status chart rendered as standalone SVG.
//!
//! # Invariants
//! - Width is `max(600, labs * 160)`, height is fixed at 280.
//! - Bar heights scale linearly to the largest lab total (floor of 1) over
//!   a 160px plot band.
//! - Label text is XML-escaped.

use super::stats::Tally;
use crate::model::lab::LabId;
use std::collections::BTreeMap;
use std::fmt::Write;

const CHART_HEIGHT: u32 = 280;
const MIN_WIDTH: u32 = 600;
const WIDTH_PER_LAB: u32 = 160;
const PLOT_TOP: f64 = 60.0;
const PLOT_HEIGHT: f64 = 160.0;
const GROUP_LEFT: u32 = 70;
const GROUP_STRIDE: u32 = 140;
const BAR_WIDTH: u32 = 28;
const BAR_STRIDE: u32 = 34;

const WORKING_COLOR: &str = "#16a34a";
const NOT_WORKING_COLOR: &str = "#dc2626";
const OTHER_COLOR: &str = "#f59e0b";

/// Renders one bar group (working / not working / other) per lab.
///
/// `labels` supplies display names; labs without one render as `Lab {id}`.
pub fn render_lab_chart(
    by_lab: &BTreeMap<LabId, Tally>,
    labels: &BTreeMap<LabId, String>,
) -> String {
    let lab_count = u32::try_from(by_lab.len()).unwrap_or(u32::MAX);
    let width = MIN_WIDTH.max(lab_count.saturating_mul(WIDTH_PER_LAB));
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{CHART_HEIGHT}" viewBox="0 0 {width} {CHART_HEIGHT}">"#
    );

    if by_lab.is_empty() {
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="14">No data</text>"#,
            width / 2,
            CHART_HEIGHT / 2
        );
        svg.push_str("</svg>");
        return svg;
    }

    let max_total = by_lab
        .values()
        .map(|tally| tally.total)
        .max()
        .unwrap_or(0)
        .max(1);
    let scale = |value: u64| value as f64 / max_total as f64 * PLOT_HEIGHT;

    for (index, (lab_id, tally)) in by_lab.iter().enumerate() {
        let x = GROUP_LEFT + GROUP_STRIDE * index as u32;
        svg.push_str("<g>");
        for (offset, value, color) in [
            (0, tally.working, WORKING_COLOR),
            (BAR_STRIDE, tally.not_working, NOT_WORKING_COLOR),
            (BAR_STRIDE * 2, tally.other, OTHER_COLOR),
        ] {
            let height = scale(value);
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{:.1}" width="{BAR_WIDTH}" height="{:.1}" fill="{color}" rx="4"/>"#,
                x + offset,
                PLOT_TOP + (PLOT_HEIGHT - height),
                height
            );
        }
        let label = labels
            .get(lab_id)
            .map(|name| escape_xml(name))
            .unwrap_or_else(|| format!("Lab {lab_id}"));
        let _ = write!(
            svg,
            r#"<text x="{}" y="240" text-anchor="middle" font-size="12">{label}</text>"#,
            x + 48
        );
        svg.push_str("</g>");
    }

    svg.push_str("<g>");
    for (x, color, caption) in [
        (10, WORKING_COLOR, "Working"),
        (110, NOT_WORKING_COLOR, "Not Working"),
        (230, OTHER_COLOR, "Under Repair/Other"),
    ] {
        let _ = write!(
            svg,
            r#"<rect x="{x}" y="10" width="12" height="12" fill="{color}"/><text x="{}" y="20" font-size="12">{caption}</text>"#,
            x + 18
        );
    }
    svg.push_str("</g></svg>");
    svg
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
