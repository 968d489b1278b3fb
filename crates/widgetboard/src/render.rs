//! Plain-text rendering of a filtered dashboard.

use widgetboard_core::{ChartKind, ChartWidgetData, DonutGeometry, Section, Widget};
use widgetboard_widgets::FilterOutcome;

/// Character width of a progress bar.
pub const BAR_WIDTH: u16 = 40;

/// Shown in place of a chart for a widget without chart data.
pub const EMPTY_PLACEHOLDER: &str = "No Graph data available!";

const BAR_GLYPHS: [char; 4] = ['█', '▓', '▒', '░'];
const BAR_EMPTY: char = '·';

/// Render a dashboard heading and its visible sections.
#[must_use]
pub fn render_text(title: &str, outcome: &FilterOutcome<'_>) -> String {
    let mut lines = vec![title.to_string()];

    for section in &outcome.sections {
        lines.push(String::new());
        lines.push(section.title().to_string());
        for widget in &section.widgets {
            lines.extend(render_widget(widget));
        }
        lines.push("  [+ Add Widget]".to_string());
    }

    if outcome.no_results() {
        if let Some(query) = outcome.query() {
            lines.push(String::new());
            lines.push(format!("No widgets found matching \"{query}\""));
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Render one widget card as indented lines.
#[must_use]
pub fn render_widget(widget: &Widget) -> Vec<String> {
    let mut lines = vec![format!("  [{}] {}", widget.id, widget.name)];
    // Text-only widgets often carry the placeholder as their text
    if !widget.text.is_empty() && widget.text != EMPTY_PLACEHOLDER {
        lines.push(format!("    {}", widget.text));
    }

    match &widget.data {
        Some(data) => match data.kind {
            ChartKind::Donut => lines.extend(donut_legend(data)),
            ChartKind::Progress => lines.extend(progress_lines(data)),
        },
        None => lines.push(format!("    {EMPTY_PLACEHOLDER}")),
    }
    lines
}

fn donut_legend(data: &ChartWidgetData) -> Vec<String> {
    let arcs = data.donut_arcs(&DonutGeometry::default());
    let mut lines = vec![format!("    Total: {}", data.total)];
    for (segment, arc) in data.segments.iter().zip(&arcs) {
        lines.push(format!(
            "      {} ({})  {:.1}%",
            segment.name,
            segment.value,
            arc.fraction * 100.0
        ));
    }
    lines
}

fn progress_lines(data: &ChartWidgetData) -> Vec<String> {
    let mut lines = vec![
        format!("    {} Total Vulnerabilities", data.total),
        format!("    [{}]", progress_bar(data, BAR_WIDTH)),
    ];
    let legend: Vec<String> = data
        .segments
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{} {} ({})", BAR_GLYPHS[i % BAR_GLYPHS.len()], s.name, s.value))
        .collect();
    if !legend.is_empty() {
        lines.push(format!("    {}", legend.join("  ")));
    }
    lines
}

/// Draw a progress bar `width` characters wide.
///
/// Segments fill left to right from their percentages; anything past the
/// right edge is cut off and the unfilled remainder is dotted.
#[must_use]
pub fn progress_bar(data: &ChartWidgetData, width: u16) -> String {
    let max = f64::from(width);
    let mut bar = String::with_capacity(usize::from(width) * 3);
    let mut drawn = 0usize;
    let mut cumulative = 0.0_f64;

    for (i, pct) in data.progress_widths().into_iter().enumerate() {
        cumulative += pct.max(0.0);
        let end = cells(cumulative / 100.0 * max, max);
        let glyph = BAR_GLYPHS[i % BAR_GLYPHS.len()];
        while drawn < end {
            bar.push(glyph);
            drawn += 1;
        }
    }
    while drawn < usize::from(width) {
        bar.push(BAR_EMPTY);
        drawn += 1;
    }
    bar
}

fn cells(position: f64, max: f64) -> usize {
    position.round().clamp(0.0, max) as usize
}

/// Owned copy of the visible sections, each holding only its shown widgets.
#[must_use]
pub fn visible_snapshot(outcome: &FilterOutcome<'_>) -> Vec<Section> {
    outcome
        .sections
        .iter()
        .map(|filtered| Section {
            id: filtered.section.id.clone(),
            title: filtered.section.title.clone(),
            widgets: filtered.widgets.iter().map(|w| (*w).clone()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use widgetboard_core::{Category, ColorToken, DashboardData, Segment, WidgetDraft};
    use widgetboard_widgets::filter_sections;

    fn progress(total: i64, values: &[i64]) -> ChartWidgetData {
        let segments = values
            .iter()
            .map(|v| Segment::with_token("s", *v, ColorToken::High))
            .collect();
        ChartWidgetData::new(ChartKind::Progress, total, segments)
    }

    #[test]
    fn test_progress_bar_halves() {
        let bar = progress_bar(&progress(2, &[1, 1]), 10);
        assert_eq!(bar, "█████▓▓▓▓▓");
    }

    #[test]
    fn test_progress_bar_remainder_dotted() {
        let bar = progress_bar(&progress(4, &[1]), 8);
        assert_eq!(bar, "██······");
    }

    #[test]
    fn test_progress_bar_zero_total() {
        let bar = progress_bar(&progress(0, &[3, 4]), 5);
        assert_eq!(bar, "·····");
    }

    #[test]
    fn test_progress_bar_overflow_clipped() {
        // Security issues: 2 + 2 against a total of 2
        let bar = progress_bar(&progress(2, &[2, 2]), 6);
        assert_eq!(bar, "██████");
        assert_eq!(bar.chars().count(), 6);
    }

    #[test]
    fn test_progress_bar_negative_value() {
        let bar = progress_bar(&progress(10, &[-5, 5]), 10);
        assert_eq!(bar, "▓▓▓▓▓·····");
    }

    #[test]
    fn test_render_widget_donut_legend() {
        let data = DashboardData::initial();
        let widget = data.section("cspm").unwrap().widget("cloud-accounts").unwrap();
        let lines = render_widget(widget);
        assert_eq!(lines[0], "  [cloud-accounts] Cloud Accounts");
        assert!(lines.contains(&"    Total: 4".to_string()));
        assert!(lines.contains(&"      Connected (2)  50.0%".to_string()));
        assert!(lines.contains(&"      Not Connected (2)  50.0%".to_string()));
    }

    #[test]
    fn test_render_widget_placeholder() {
        let widget = WidgetDraft::text("Empty", "", Category::Ticket).into_widget("e");
        let lines = render_widget(&widget);
        assert_eq!(lines, vec!["  [e] Empty", "    No Graph data available!"]);
    }

    #[test]
    fn test_render_widget_placeholder_with_text() {
        let widget =
            WidgetDraft::text("Runtime Alerts", "Nothing yet", Category::Cwpp).into_widget("w");
        let lines = render_widget(&widget);
        assert_eq!(
            lines,
            vec![
                "  [w] Runtime Alerts",
                "    Nothing yet",
                "    No Graph data available!"
            ]
        );
    }

    #[test]
    fn test_render_widget_placeholder_not_repeated() {
        let data = DashboardData::initial();
        let widget = data.section("cwpp").unwrap().widget("workload-alerts").unwrap();
        let lines = render_widget(widget);
        assert_eq!(
            lines,
            vec!["  [workload-alerts] Workload Alerts", "    No Graph data available!"]
        );
    }

    #[test]
    fn test_render_widget_progress_header() {
        let data = DashboardData::initial();
        let widget = data.section("registry").unwrap().widget("image-risk").unwrap();
        let lines = render_widget(widget);
        assert_eq!(lines[2], "    1470 Total Vulnerabilities");
        assert!(lines[3].starts_with("    ["));
        assert_eq!(lines[4], "    █ Critical (9)  ▓ High (150)");
    }

    #[test]
    fn test_render_text_lists_every_section() {
        let data = DashboardData::initial();
        let text = render_text("CNAPP Dashboard", &filter_sections(&data.sections, ""));
        assert!(text.starts_with("CNAPP Dashboard\n"));
        for title in [
            "CSPM Executive Dashboard",
            "CWPP Dashboard",
            "Registry Scan",
            "Ticket Dashboard",
        ] {
            assert!(text.contains(title), "missing {title}");
        }
        assert_eq!(text.matches("[+ Add Widget]").count(), 4);
        assert!(!text.contains("No widgets found"));
    }

    #[test]
    fn test_render_text_no_results() {
        let data = DashboardData::initial();
        let text = render_text("T", &filter_sections(&data.sections, "zzz"));
        assert_eq!(text, "T\n\nNo widgets found matching \"zzz\"\n");
    }

    #[test]
    fn test_visible_snapshot_keeps_only_matches() {
        let data = DashboardData::initial();
        let outcome = filter_sections(&data.sections, "workload");
        let sections = visible_snapshot(&outcome);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, "cwpp");
        assert_eq!(sections[0].widgets.len(), 1);
        assert_eq!(sections[0].widgets[0].id, "workload-alerts");
    }
}
