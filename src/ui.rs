use crate::models::{JournalEntry, Routine, SleepChartPoint, SleepEntry, Streaks};
use crate::state::Trackers;
use crate::timer::format_time;
use chrono::Local;
use std::fmt::Write;

pub fn render_index(trackers: &Trackers) -> String {
    let summary = trackers.summary();
    let overview = trackers.sleep.overview();

    INDEX_HTML
        .replace("{{TODAY}}", &Local::now().date_naive().to_string())
        .replace("{{SCORE}}", &summary.score.to_string())
        .replace("{{LABEL}}", summary.label)
        .replace("{{STREAKS}}", &render_streaks(&summary.streaks))
        .replace("{{QUOTE}}", &escape(summary.quote.text))
        .replace("{{AUTHOR}}", &escape(summary.quote.author))
        .replace("{{SLEEP_CHART}}", &render_sleep_chart(&overview.chart))
        .replace("{{SLEEP_ROWS}}", &render_sleep_rows(&overview.history))
        .replace("{{ROUTINES}}", &render_routines(trackers.fitness.routines()))
        .replace("{{JOURNAL}}", &render_journal(&trackers.journal.search("", None)))
}

fn render_streaks(streaks: &Streaks) -> String {
    let bars = [
        ("Sleep", streaks.sleep, 7),
        ("Fitness", streaks.fitness, 5),
        ("Journal", streaks.journal, 5),
    ];
    let mut html = String::new();
    for (label, value, max) in bars {
        let _ = write!(
            html,
            r#"<div class="stat"><span class="label">{label}</span><span class="value">{value}/{max}</span><div class="bar"><i style="width:{pct}%"></i></div></div>"#,
            pct = value * 100 / max,
        );
    }
    html
}

fn render_sleep_chart(points: &[SleepChartPoint]) -> String {
    let mut html = String::new();
    for point in points {
        let _ = write!(
            html,
            r#"<div class="column"><i style="height:{height:.0}%"></i><span>{date}</span><b>{hours:.1}h</b></div>"#,
            height = point.hours / 12.0 * 100.0,
            date = escape(&point.date),
            hours = point.hours,
        );
    }
    html
}

fn render_sleep_rows(entries: &[SleepEntry]) -> String {
    let mut html = String::new();
    for entry in entries {
        let _ = write!(
            html,
            "<li><span>{}</span><b>{:.1} hours</b></li>",
            entry.date.format("%B %-d, %Y"),
            entry.hours
        );
    }
    html
}

fn render_routines(routines: &[Routine]) -> String {
    let mut html = String::new();
    for routine in routines {
        let _ = write!(
            html,
            r#"<div class="routine"><h3>{} <small>{}/{} done</small></h3><ul>"#,
            escape(&routine.name),
            routine.completed_count(),
            routine.exercises.len()
        );
        for exercise in &routine.exercises {
            let _ = write!(
                html,
                r#"<li class="{class}"><span>{name}</span><span>{time}</span><button type="button" data-routine="{rid}" data-exercise="{eid}" class="start">Start</button></li>"#,
                class = if exercise.completed { "done" } else { "" },
                name = escape(&exercise.name),
                time = format_time(exercise.duration),
                rid = escape(&routine.id),
                eid = escape(&exercise.id),
            );
        }
        html.push_str("</ul></div>");
    }
    html
}

fn render_journal(entries: &[JournalEntry]) -> String {
    let mut html = String::new();
    for entry in entries {
        let tags = entry
            .tags
            .iter()
            .map(|tag| format!("<em>{}</em>", escape(tag)))
            .collect::<String>();
        let _ = write!(
            html,
            r#"<article><header>{emoji} {date}</header><p>{content}</p><div class="tags">{tags}</div></article>"#,
            emoji = entry.mood.emoji(),
            date = entry.date.format("%B %-d, %Y"),
            content = escape(&entry.content),
        );
    }
    html
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Wellness Dashboard</title>
  <style>
    :root {
      --bg-1: #eef4f1;
      --ink: #23302b;
      --accent: #4f7cff;
      --accent-2: #2f6f58;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: linear-gradient(135deg, var(--bg-1), #f7fbff 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    section {
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 24px;
      display: grid;
      gap: 14px;
    }

    h1, h2, h3 {
      margin: 0;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 14px;
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8782;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .bar {
      height: 8px;
      border-radius: 999px;
      background: rgba(47, 111, 88, 0.12);
      overflow: hidden;
    }

    .bar i {
      display: block;
      height: 100%;
      background: var(--accent-2);
    }

    .chart {
      display: flex;
      align-items: flex-end;
      gap: 10px;
      height: 180px;
    }

    .column {
      flex: 1;
      height: 100%;
      display: flex;
      flex-direction: column;
      justify-content: flex-end;
      align-items: center;
      font-size: 0.75rem;
    }

    .column i {
      width: 100%;
      border-radius: 8px 8px 0 0;
      background: var(--accent);
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 6px;
    }

    li {
      display: flex;
      justify-content: space-between;
      gap: 12px;
    }

    li.done span:first-child {
      text-decoration: line-through;
      color: #7d8782;
    }

    .tags em {
      font-style: normal;
      font-size: 0.8rem;
      margin-right: 6px;
      padding: 2px 8px;
      border-radius: 999px;
      background: rgba(79, 124, 255, 0.12);
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    #timer {
      font-size: 2rem;
      font-weight: 600;
    }
  </style>
</head>
<body>
  <main class="app">
    <section>
      <h1>Wellness Dashboard</h1>
      <div class="panel">
        <div class="stat">
          <span class="label">Wellness score</span>
          <span class="value">{{SCORE}}</span>
          <span>{{LABEL}}</span>
        </div>
        {{STREAKS}}
      </div>
      <blockquote>&ldquo;{{QUOTE}}&rdquo; &mdash; {{AUTHOR}}</blockquote>
    </section>

    <section>
      <h2>Sleep</h2>
      <form method="post" action="/sleep">
        <input type="date" name="date" value="{{TODAY}}" required />
        <input type="number" name="hours" min="0" max="24" step="0.1" value="8" required />
        <button type="submit">Save</button>
      </form>
      <div class="chart">{{SLEEP_CHART}}</div>
      <ul>{{SLEEP_ROWS}}</ul>
    </section>

    <section>
      <h2>Fitness</h2>
      <div><span id="timer">0:00</span> <button type="button" id="toggle">Pause / Resume</button> <button type="button" id="reset">Reset</button></div>
      {{ROUTINES}}
    </section>

    <section>
      <h2>Journal</h2>
      <form method="post" action="/journal">
        <input type="date" name="date" value="{{TODAY}}" required />
        <select name="mood">
          <option value="great">Great</option>
          <option value="good">Good</option>
          <option value="neutral" selected>Neutral</option>
          <option value="bad">Bad</option>
          <option value="terrible">Terrible</option>
        </select>
        <input type="text" name="tags" placeholder="tags, comma separated" />
        <textarea name="content" required></textarea>
        <button type="submit">Save entry</button>
      </form>
      {{JOURNAL}}
    </section>
  </main>

  <script>
    const timer = document.getElementById("timer");

    async function call(path, body) {
      const response = await fetch(path, {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify(body ?? {}),
      });
      if (response.ok) {
        render(await response.json());
      }
    }

    function render(snapshot) {
      timer.textContent = snapshot.display;
      if (snapshot.state === "idle" && timer.dataset.state && timer.dataset.state !== "idle") {
        window.location.reload();
      }
      timer.dataset.state = snapshot.state;
    }

    document.querySelectorAll("button.start").forEach((button) => {
      button.addEventListener("click", () =>
        call("/api/fitness/timer/start", {
          routine_id: button.dataset.routine,
          exercise_id: button.dataset.exercise,
        }),
      );
    });
    document.getElementById("toggle").addEventListener("click", () => call("/api/fitness/timer/toggle"));
    document.getElementById("reset").addEventListener("click", () => call("/api/fitness/timer/reset"));

    setInterval(async () => {
      const response = await fetch("/api/fitness/timer");
      if (response.ok) {
        render(await response.json());
      }
    }, 1000);
  </script>
</body>
</html>
"#;
