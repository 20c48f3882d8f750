//! HTML status dashboard

use axum::{extract::State, response::Html};
use tracing::info;

use crate::health::StatusReport;
use crate::AppState;

pub async fn handle_root(State(state): State<AppState>) -> Html<String> {
    info!("GET / - Rendering status dashboard");

    let report = state.aggregator.build_report().await;
    Html(render_dashboard(&report, state.port))
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn format_uptime(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

pub fn render_dashboard(report: &StatusReport, port: u16) -> String {
    let system = &report.system;
    let dependency = &report.dependency;

    let (db_class, db_label) = if dependency.is_connected() {
        ("success", "Connected")
    } else {
        ("error", "Disconnected")
    };

    let memory_mb = (system.memory_used_bytes as f64 / 1024.0 / 1024.0).round() as u64;
    let updated_at = system.captured_at.format("%Y-%m-%d %H:%M:%S UTC");
    let checked_at = dependency.checked_at.format("%Y-%m-%d %H:%M:%S UTC");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Status Dashboard</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            min-height: 100vh;
            padding: 20px;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; padding: 40px; border-radius: 20px; background: rgba(255, 255, 255, 0.1); }}
        .header {{ text-align: center; margin-bottom: 40px; }}
        .grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 25px; margin-bottom: 30px; }}
        .card {{ background: rgba(255, 255, 255, 0.15); padding: 25px; border-radius: 15px; margin-bottom: 25px; }}
        .card h3 {{ margin-bottom: 15px; }}
        .status-item {{ display: flex; justify-content: space-between; padding: 8px 0; border-bottom: 1px solid rgba(255, 255, 255, 0.1); }}
        .status-item:last-child {{ border-bottom: none; }}
        .status-value {{ font-weight: bold; }}
        .success {{ color: #4ade80; }}
        .error {{ color: #f87171; }}
        .info {{ color: #fff; }}
        .routes {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 15px; }}
        .route-item {{ background: rgba(0, 0, 0, 0.2); padding: 15px; border-radius: 10px; }}
        .route-item a {{ color: #fff; text-decoration: none; font-weight: bold; }}
        .footer {{ text-align: center; margin-top: 40px; opacity: 0.8; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Status Dashboard</h1>
        </div>

        <div class="grid">
            <div class="card">
                <h3>System Status</h3>
                <div class="status-item">
                    <span>Server:</span>
                    <span class="status-value success">Running on port {port}</span>
                </div>
                <div class="status-item">
                    <span>Database:</span>
                    <span class="status-value {db_class}">{db_label}</span>
                </div>
                <div class="status-item">
                    <span>Connection status:</span>
                    <span class="status-value info">{detail}</span>
                </div>
                <div class="status-item">
                    <span>Last checked:</span>
                    <span class="status-value info">{checked_at}</span>
                </div>
                <div class="status-item">
                    <span>Uptime:</span>
                    <span class="status-value info">{uptime}</span>
                </div>
            </div>

            <div class="card">
                <h3>System Information</h3>
                <div class="status-item">
                    <span>Version:</span>
                    <span class="status-value info">{version}</span>
                </div>
                <div class="status-item">
                    <span>Platform:</span>
                    <span class="status-value info">{platform}</span>
                </div>
                <div class="status-item">
                    <span>Memory used:</span>
                    <span class="status-value info">{memory_mb} MB</span>
                </div>
                <div class="status-item">
                    <span>Last update:</span>
                    <span class="status-value info">{updated_at}</span>
                </div>
            </div>
        </div>

        <div class="card">
            <h3>Available Routes</h3>
            <div class="routes">
                <div class="route-item"><a href="/">Home</a></div>
                <div class="route-item"><a href="/api/status">API status</a></div>
                <div class="route-item"><a href="/api/database">Database status</a></div>
                <div class="route-item"><a href="/api/test" onclick="testPost(); return false;">POST test</a></div>
                <div class="route-item"><a href="/login">Login page</a></div>
            </div>
        </div>

        <div class="footer">
            <p>Page refreshes every 30 seconds</p>
        </div>
    </div>

    <script>
        function testPost() {{
            fetch('/api/test', {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify({{ message: 'Dashboard test', timestamp: new Date().toISOString() }})
            }})
            .then(response => response.json())
            .then(data => alert('POST test succeeded\n\n' + JSON.stringify(data, null, 2)))
            .catch(error => alert('POST test failed: ' + error.message));
        }}

        setInterval(() => location.reload(), 30000);
    </script>
</body>
</html>
"#,
        port = port,
        db_class = db_class,
        db_label = db_label,
        detail = escape_html(&dependency.detail),
        checked_at = checked_at,
        uptime = format_uptime(system.uptime_seconds),
        version = escape_html(&system.runtime_version),
        platform = escape_html(&system.platform),
        memory_mb = memory_mb,
        updated_at = updated_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{DependencyState, DependencyStatus, SystemSnapshot};

    fn report(state: DependencyState, detail: &str) -> StatusReport {
        StatusReport {
            system: SystemSnapshot {
                uptime_seconds: 185,
                memory_used_bytes: 10 * 1024 * 1024,
                platform: "linux".to_string(),
                runtime_version: "v0.1.0".to_string(),
                captured_at: chrono::Utc::now(),
            },
            dependency: DependencyStatus {
                state,
                detail: detail.to_string(),
                checked_at: chrono::Utc::now(),
            },
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0m 0s");
        assert_eq!(format_uptime(185), "3m 5s");
    }

    #[test]
    fn test_render_connected() {
        let html = render_dashboard(&report(DependencyState::Connected, "connected"), 3000);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Running on port 3000"));
        assert!(html.contains(r#"<span class="status-value success">Connected</span>"#));
        assert!(html.contains("3m 5s"));
        assert!(html.contains("10 MB"));
        assert!(html.contains("linux"));
    }

    #[test]
    fn test_render_degraded_dependency() {
        let html = render_dashboard(
            &report(DependencyState::Unknown, "probe timed out <after 2000ms>"),
            8080,
        );

        assert!(html.contains(r#"<span class="status-value error">Disconnected</span>"#));
        assert!(html.contains("probe timed out &lt;after 2000ms&gt;"));
        assert!(!html.contains("<after 2000ms>"));
    }
}
