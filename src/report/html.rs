use super::types::{EventKind, RunReport};
use crate::runner::state::StepStatus;
use anyhow::Result;
use std::path::Path;

/// Write the HTML report, overwriting any prior file at `output`.
pub fn generate(report: &RunReport, output: &Path) -> Result<()> {
    std::fs::write(output, generate_html(report))?;
    Ok(())
}

fn generate_html(report: &RunReport) -> String {
    let summary = &report.summary;
    let pass_rate = if summary.total_steps > 0 {
        (summary.passed as f64 / summary.total_steps as f64 * 100.0) as u32
    } else {
        0
    };

    let mut steps_html = String::new();
    for step in &report.steps {
        let (icon, class) = match &step.status {
            StepStatus::Passed => ("✓", "passed"),
            StepStatus::Failed { .. } => ("✗", "failed"),
            StepStatus::Skipped { .. } => ("○", "skipped"),
            StepStatus::Running => ("⋯", "running"),
            StepStatus::Pending => ("○", "pending"),
        };

        let detail_html = match &step.status {
            StepStatus::Failed { error } => format!(
                r#"<div class="step-error">{}</div>"#,
                html_escape(error)
            ),
            StepStatus::Skipped { reason } => format!(
                r#"<div class="step-skip">{}</div>"#,
                html_escape(reason)
            ),
            _ => String::new(),
        };

        let duration_html = step
            .duration_ms
            .map(|d| format!(r#"<span class="duration">{}ms</span>"#, d))
            .unwrap_or_default();

        steps_html.push_str(&format!(
            r#"
            <li class="step {class}">
                <span class="step-icon">{icon}</span>
                <div class="step-body">
                    <span class="step-name">{}</span>
                    {duration_html}
                    {detail_html}
                </div>
            </li>
        "#,
            html_escape(&step.name),
        ));
    }

    let mut events_html = String::new();
    for event in &report.events {
        let badge = match event.kind {
            EventKind::Info => "info",
            EventKind::Pass => "pass",
            EventKind::Fail => "fail",
        };
        events_html.push_str(&format!(
            r#"
            <tr class="{badge}">
                <td class="ts">{}</td>
                <td><span class="badge {badge}">{badge}</span></td>
                <td>{}</td>
            </tr>
        "#,
            html_escape(&event.timestamp),
            html_escape(&event.message),
        ));
    }

    let screenshots_html = if report.screenshots.is_empty() {
        String::new()
    } else {
        let mut shots = String::from(r#"<h2>Screenshots</h2><div class="shots">"#);
        for path in &report.screenshots {
            shots.push_str(&format!(
                r##"<a href="#" class="shot" onclick="showShot('{0}')">{0}</a>"##,
                html_escape(path)
            ));
        }
        shots.push_str("</div>");
        shots
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{test_name}</title>
    <style>
        :root {{
            --bg: #0d1117;
            --panel: #161b22;
            --line: #30363d;
            --fg: #e6edf3;
            --muted: #8b949e;
            --green: #3fb950;
            --red: #f85149;
            --yellow: #d29922;
            --blue: #58a6ff;
        }}

        * {{ margin: 0; padding: 0; box-sizing: border-box; }}

        body {{
            font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
            background: var(--bg);
            color: var(--fg);
            line-height: 1.5;
            padding: 2.5rem 1rem;
        }}

        .container {{ max-width: 960px; margin: 0 auto; }}

        header {{ margin-bottom: 2rem; }}
        h1 {{ font-size: 1.75rem; font-weight: 700; }}
        h2 {{ font-size: 1.125rem; font-weight: 600; margin: 2rem 0 0.75rem; }}
        .subtitle {{ color: var(--muted); font-size: 0.875rem; margin-top: 0.25rem; }}

        .summary {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
            gap: 1rem;
            margin-bottom: 1.5rem;
        }}
        .stat {{
            background: var(--panel);
            border: 1px solid var(--line);
            border-radius: 0.5rem;
            padding: 1rem;
        }}
        .stat-value {{ font-size: 1.75rem; font-weight: 700; }}
        .stat-label {{ color: var(--muted); font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.05em; }}
        .stat.passed .stat-value {{ color: var(--green); }}
        .stat.failed .stat-value {{ color: var(--red); }}
        .stat.skipped .stat-value {{ color: var(--yellow); }}

        .progress {{
            background: var(--panel);
            border: 1px solid var(--line);
            height: 8px;
            border-radius: 4px;
            overflow: hidden;
            margin-bottom: 2rem;
        }}
        .progress-fill {{ height: 100%; background: var(--green); }}

        .steps {{ list-style: none; }}
        .step {{
            display: flex;
            gap: 0.75rem;
            padding: 0.6rem 0.75rem;
            border: 1px solid var(--line);
            border-radius: 0.5rem;
            margin-bottom: 0.4rem;
            background: var(--panel);
            align-items: baseline;
        }}
        .step.passed .step-icon {{ color: var(--green); }}
        .step.failed .step-icon {{ color: var(--red); }}
        .step.skipped .step-icon {{ color: var(--yellow); }}
        .step-name {{ font-weight: 500; }}
        .duration {{ color: var(--muted); font-size: 0.75rem; margin-left: 0.5rem; }}
        .step-error {{
            color: var(--red);
            font-family: ui-monospace, monospace;
            font-size: 0.8125rem;
            margin-top: 0.25rem;
        }}
        .step-skip {{ color: var(--muted); font-size: 0.8125rem; margin-top: 0.25rem; }}

        table {{ width: 100%; border-collapse: collapse; font-size: 0.875rem; }}
        td {{ padding: 0.4rem 0.6rem; border-bottom: 1px solid var(--line); vertical-align: top; }}
        td.ts {{ color: var(--muted); white-space: nowrap; font-family: ui-monospace, monospace; }}
        .badge {{
            font-size: 0.6875rem;
            font-weight: 600;
            text-transform: uppercase;
            padding: 0.1rem 0.45rem;
            border-radius: 999px;
        }}
        .badge.info {{ background: rgba(88, 166, 255, 0.15); color: var(--blue); }}
        .badge.pass {{ background: rgba(63, 185, 80, 0.15); color: var(--green); }}
        .badge.fail {{ background: rgba(248, 81, 73, 0.15); color: var(--red); }}

        .shots {{ display: flex; flex-wrap: wrap; gap: 0.5rem; }}
        .shot {{ color: var(--blue); font-size: 0.8125rem; text-decoration: none; }}
        .shot:hover {{ text-decoration: underline; }}

        footer {{
            margin-top: 2.5rem;
            padding-top: 1rem;
            border-top: 1px solid var(--line);
            color: var(--muted);
            font-size: 0.8125rem;
            display: flex;
            justify-content: space-between;
        }}

        #modal {{
            display: none;
            position: fixed;
            inset: 0;
            z-index: 10;
            background: rgba(0, 0, 0, 0.85);
            padding: 2rem;
            align-items: center;
            justify-content: center;
        }}
        #modal.active {{ display: flex; }}
        #modal img {{ max-width: 100%; max-height: 100%; border-radius: 0.25rem; }}
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{test_name}</h1>
            <div class="subtitle">Engine: {engine} · Started: {started_at} · Run: {run_id}</div>
        </header>

        <div class="summary">
            <div class="stat">
                <div class="stat-value">{total_steps}</div>
                <div class="stat-label">Steps</div>
            </div>
            <div class="stat passed">
                <div class="stat-value">{passed}</div>
                <div class="stat-label">Passed</div>
            </div>
            <div class="stat failed">
                <div class="stat-value">{failed}</div>
                <div class="stat-label">Failed</div>
            </div>
            <div class="stat skipped">
                <div class="stat-value">{skipped}</div>
                <div class="stat-label">Skipped</div>
            </div>
        </div>

        <div class="progress"><div class="progress-fill" style="width: {pass_rate}%"></div></div>

        <h2>Steps</h2>
        <ul class="steps">{steps_html}</ul>

        <h2>Event Log</h2>
        <table>{events_html}</table>

        {screenshots_html}

        <footer>
            <span>Duration: {duration}</span>
            <span>Generated: {generated_at}</span>
        </footer>
    </div>

    <div id="modal" onclick="this.classList.remove('active')">
        <img id="modal-img" src="" alt="Screenshot">
    </div>

    <script>
        function showShot(path) {{
            document.getElementById('modal-img').src = path;
            document.getElementById('modal').classList.add('active');
            event.preventDefault();
        }}
    </script>
</body>
</html>"#,
        test_name = html_escape(&report.test_name),
        engine = html_escape(&report.engine),
        started_at = html_escape(&report.started_at),
        run_id = html_escape(&report.run_id),
        total_steps = summary.total_steps,
        passed = summary.passed,
        failed = summary.failed,
        skipped = summary.skipped,
        pass_rate = pass_rate,
        steps_html = steps_html,
        events_html = events_html,
        screenshots_html = screenshots_html,
        duration = format_duration(summary.total_duration_ms.unwrap_or(0)),
        generated_at = html_escape(&report.generated_at),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let minutes = ms / 60000;
        let seconds = (ms % 60000) as f64 / 1000.0;
        format!("{}m {:.0}s", minutes, seconds)
    }
}
