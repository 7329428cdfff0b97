//! Embedded HTML/CSS/JS frontend for the phishguard web dashboard.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>PhishGuard Dashboard</title>
<style>
:root {
  --bg: #0a0f1e;
  --surface: #111827;
  --border: #273349;
  --text: #e5eaf3;
  --text-muted: #94a3b8;
  --accent: #38bdf8;
  --green: #34d399;
  --yellow: #fbbf24;
  --red: #f87171;
  --purple: #a78bfa;
  --cyan: #22d3ee;
  --radius: 10px;
  --font: 'Inter', 'Segoe UI', system-ui, -apple-system, sans-serif;
  --mono: 'JetBrains Mono', 'Fira Code', Consolas, monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

/* Layout */
.app {
  max-width: 1100px;
  margin: 0 auto;
  padding: 24px;
}

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}

header h1 {
  font-size: 24px;
  font-weight: 600;
  display: flex;
  align-items: center;
  gap: 10px;
}

header h1 .logo { color: var(--accent); font-weight: 700; }

header .subtitle {
  color: var(--text-muted);
  font-size: 13px;
}

.health-badges {
  display: flex;
  gap: 8px;
}

.badge {
  display: inline-flex;
  align-items: center;
  gap: 4px;
  padding: 4px 10px;
  border-radius: 12px;
  font-size: 12px;
  font-weight: 500;
  background: var(--surface);
  border: 1px solid var(--border);
}

.badge.ok { border-color: var(--green); color: var(--green); }
.badge.warn { border-color: var(--yellow); color: var(--yellow); }
.badge.err { border-color: var(--red); color: var(--red); }

/* Navigation */
nav {
  display: flex;
  gap: 4px;
  margin-bottom: 24px;
  background: var(--surface);
  border-radius: var(--radius);
  padding: 4px;
  border: 1px solid var(--border);
}

nav button {
  flex: 1;
  padding: 8px 16px;
  border: none;
  border-radius: 6px;
  background: transparent;
  color: var(--text-muted);
  font-size: 13px;
  font-weight: 500;
  cursor: pointer;
  transition: all 0.15s;
}

nav button:hover { color: var(--text); background: rgba(255,255,255,0.04); }
nav button.active { background: var(--accent); color: #fff; }

/* Cards */
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 16px;
}

.card h2 {
  font-size: 16px;
  font-weight: 600;
  margin-bottom: 16px;
  color: var(--text);
}

.card h3 {
  font-size: 14px;
  font-weight: 600;
  margin-bottom: 12px;
  color: var(--text-muted);
}

.card .lead {
  color: var(--text-muted);
  font-size: 13px;
  margin-bottom: 16px;
}

/* Hero */
.hero {
  text-align: center;
  padding: 28px 20px 20px;
}

.hero .shield { font-size: 40px; display: block; margin-bottom: 10px; }

.hero h2 {
  font-size: 26px;
  font-weight: 700;
  margin-bottom: 10px;
}

.hero p {
  color: var(--text-muted);
  max-width: 640px;
  margin: 0 auto;
  font-size: 15px;
}

/* Feature grid */
.feature-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
  gap: 16px;
  margin-bottom: 24px;
}

.feature-grid .card { margin-bottom: 0; }
.feature-grid .icon { font-size: 22px; margin-bottom: 8px; }
.feature-grid h2 { margin-bottom: 8px; }
.feature-grid p { color: var(--text-muted); font-size: 13px; }

/* Scan form */
.scan-row {
  display: flex;
  gap: 8px;
  margin-bottom: 16px;
}

.scan-row input {
  flex: 1;
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 6px;
  color: var(--text);
  padding: 10px 12px;
  font-size: 14px;
  font-family: var(--mono);
}

.scan-row input:focus { outline: none; border-color: var(--accent); }

.scan-error {
  background: rgba(248, 81, 73, 0.1);
  border: 1px solid var(--red);
  color: var(--red);
  border-radius: 6px;
  padding: 10px 14px;
  margin-bottom: 16px;
  font-size: 13px;
}

/* Verdict */
.verdict {
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
}

.verdict.ok { border-color: var(--green); background: rgba(63, 185, 80, 0.08); }
.verdict.bad { border-color: var(--red); background: rgba(248, 81, 73, 0.08); }

.verdict .headline {
  display: flex;
  align-items: center;
  gap: 10px;
  font-size: 16px;
  font-weight: 600;
  margin-bottom: 12px;
}

.verdict.ok .headline { color: var(--green); }
.verdict.bad .headline { color: var(--red); }

.conf-line {
  display: flex;
  align-items: center;
  gap: 10px;
  font-size: 13px;
  margin-bottom: 10px;
}

.conf-track {
  flex: 1;
  max-width: 320px;
  height: 8px;
  background: var(--border);
  border-radius: 4px;
  overflow: hidden;
}

.conf-fill {
  height: 100%;
  border-radius: 4px;
  background: var(--accent);
  transition: width 0.4s;
}

.verdict.ok .conf-fill { background: var(--green); }
.verdict.bad .conf-fill { background: var(--red); }

.verdict .note {
  color: var(--text-muted);
  font-size: 12px;
  margin-top: 10px;
}

/* Stats grid */
.stats-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
  gap: 16px;
  margin-bottom: 24px;
}

.stat-card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  text-align: center;
}

.stat-card .value {
  font-size: 32px;
  font-weight: 700;
  font-family: var(--mono);
  color: var(--accent);
  line-height: 1.1;
}

.stat-card .value.green { color: var(--green); }
.stat-card .value.purple { color: var(--purple); }
.stat-card .value.cyan { color: var(--cyan); }
.stat-card .value.red { color: var(--red); }
.stat-card .value.yellow { color: var(--yellow); }

.stat-card .label {
  font-size: 12px;
  color: var(--text-muted);
  margin-top: 6px;
  text-transform: uppercase;
  letter-spacing: 0.5px;
}

.stat-card .sub {
  font-size: 11px;
  color: var(--text-muted);
  margin-top: 6px;
}

/* Tables */
table {
  width: 100%;
  border-collapse: collapse;
  font-size: 13px;
}

th, td {
  text-align: left;
  padding: 8px 12px;
  border-bottom: 1px solid var(--border);
}

th {
  color: var(--text-muted);
  font-weight: 500;
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.5px;
}

td { color: var(--text); }
td.mono { font-family: var(--mono); font-size: 12px; }
td.num { text-align: right; font-family: var(--mono); }
th.num { text-align: right; }

tr:hover { background: rgba(255,255,255,0.02); }

.cm-table td.good { color: var(--green); font-weight: 600; }
.cm-table td.badv { color: var(--red); font-weight: 600; }

.cm-note {
  color: var(--text-muted);
  font-size: 12px;
  margin-top: 10px;
  text-align: center;
}

/* Bar chart */
.chart {
  display: flex;
  align-items: flex-end;
  gap: 4px;
  height: 160px;
  padding-top: 20px;
  margin-bottom: 8px;
}

.chart .bar-group {
  flex: 1;
  display: flex;
  flex-direction: column;
  align-items: center;
  height: 100%;
  justify-content: flex-end;
}

.chart .bar {
  width: 100%;
  max-width: 28px;
  background: var(--accent);
  border-radius: 3px 3px 0 0;
  min-height: 2px;
  transition: height 0.4s;
  position: relative;
}

.chart .bar:hover { opacity: 0.8; }

.chart .bar-label {
  font-size: 10px;
  color: var(--text-muted);
  margin-top: 6px;
  writing-mode: vertical-rl;
  text-orientation: mixed;
  transform: rotate(180deg);
  max-height: 60px;
  overflow: hidden;
}

.chart-tooltip {
  position: absolute;
  bottom: calc(100% + 6px);
  left: 50%;
  transform: translateX(-50%);
  background: #1f2937;
  color: #fff;
  padding: 4px 8px;
  border-radius: 4px;
  font-size: 11px;
  white-space: nowrap;
  pointer-events: none;
  opacity: 0;
  transition: opacity 0.15s;
}

.chart .bar:hover .chart-tooltip { opacity: 1; }

/* Importance bars */
.imp-row {
  display: flex;
  align-items: center;
  gap: 12px;
  padding: 7px 0;
}

.imp-label {
  flex: 0 0 240px;
  font-size: 13px;
}

.imp-label .mono { font-family: var(--mono); }

.imp-label .desc {
  display: block;
  font-size: 11px;
  color: var(--text-muted);
}

.imp-track {
  flex: 1;
  height: 10px;
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 5px;
  overflow: hidden;
}

.imp-fill {
  height: 100%;
  background: var(--accent);
  transition: width 0.4s;
}

.imp-value {
  flex: 0 0 44px;
  text-align: right;
  font-family: var(--mono);
  font-size: 12px;
}

/* Guide */
.pipeline {
  display: flex;
  align-items: center;
  justify-content: center;
  gap: 14px;
  margin: 8px 0 16px;
  color: var(--text-muted);
}

.pipeline .stage {
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 12px 18px;
  text-align: center;
  font-size: 13px;
  color: var(--text);
}

.pipeline .stage .icon { display: block; font-size: 20px; margin-bottom: 4px; }

.code {
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 12px 14px;
  font-family: var(--mono);
  font-size: 12.5px;
  white-space: pre;
  overflow-x: auto;
  margin: 12px 0;
  color: var(--text);
}

.note-box {
  background: rgba(210, 153, 34, 0.1);
  border: 1px solid var(--yellow);
  border-radius: 6px;
  padding: 12px 14px;
  font-size: 13px;
  margin-top: 12px;
}

.note-box strong { color: var(--yellow); }

.steps { padding-left: 20px; font-size: 13px; }
.steps li { margin: 6px 0; }

.guide-text { font-size: 13px; margin-bottom: 8px; }
.guide-text.muted { color: var(--text-muted); }

/* Buttons */
.btn {
  display: inline-flex;
  align-items: center;
  gap: 6px;
  padding: 8px 16px;
  border: 1px solid var(--border);
  border-radius: 6px;
  background: var(--surface);
  color: var(--text);
  font-size: 13px;
  cursor: pointer;
  transition: all 0.15s;
}

.btn:hover { border-color: var(--accent); color: var(--accent); }
.btn.primary { background: var(--accent); color: #fff; border-color: var(--accent); }
.btn.primary:hover { opacity: 0.85; }
.btn:disabled { opacity: 0.6; cursor: wait; }

/* Toast notification */
.toast {
  position: fixed;
  bottom: 24px;
  right: 24px;
  padding: 12px 20px;
  border-radius: var(--radius);
  background: var(--green);
  color: #fff;
  font-weight: 500;
  font-size: 13px;
  transform: translateY(80px);
  opacity: 0;
  transition: all 0.3s;
  z-index: 1000;
}

.toast.show { transform: translateY(0); opacity: 1; }
.toast.error { background: var(--red); }

/* Panels / Tabs */
.panel { display: none; }
.panel.active { display: block; }

/* Empty state */
.empty {
  text-align: center;
  padding: 40px 20px;
  color: var(--text-muted);
}

.empty .icon { font-size: 48px; margin-bottom: 12px; }
.empty p { max-width: 400px; margin: 0 auto; }

/* Responsive */
@media (max-width: 768px) {
  .stats-grid { grid-template-columns: repeat(2, 1fr); }
  .imp-label { flex: 0 0 130px; }
  .pipeline { flex-direction: column; }
  nav { flex-wrap: wrap; }
}
</style>
</head>
<body>
<div class="app">

  <!-- Header -->
  <header>
    <div>
      <h1><span class="logo">🛡 PhishGuard</span> Dashboard</h1>
      <div class="subtitle">Phishing Website Detection System</div>
    </div>
    <div class="health-badges" id="health-badges"></div>
  </header>

  <!-- Navigation -->
  <nav id="nav">
    <button class="active" data-panel="home">Home</button>
    <button data-panel="model">Model Performance</button>
    <button data-panel="guide">Getting Started</button>
  </nav>

  <!-- Home Panel -->
  <div class="panel active" id="panel-home">
    <div class="hero">
      <span class="shield">🛡</span>
      <h2>Phishing Website Detection System</h2>
      <p>An advanced machine learning system that helps protect users from phishing
      attacks by analyzing URLs and website content in real-time.</p>
    </div>

    <div class="feature-grid">
      <div class="card">
        <div class="icon">✅</div>
        <h2>ML-Powered Detection</h2>
        <p>Our XGBoost model analyzes multiple features of URLs and websites to
        identify phishing attempts with high accuracy.</p>
      </div>
      <div class="card">
        <div class="icon">⚡</div>
        <h2>Real-Time Analysis</h2>
        <p>Get instant feedback on websites you visit with our Chrome extension,
        powered by a fast Flask API backend.</p>
      </div>
      <div class="card">
        <div class="icon">🔍</div>
        <h2>Advanced Features</h2>
        <p>Analyzes URL patterns, domain information, and page content to provide
        comprehensive protection against sophisticated attacks.</p>
      </div>
    </div>

    <div class="card">
      <h2>Try It Out</h2>
      <p class="lead">Enter a URL below to see how our phishing detection works.
      This is a demo version that simulates the behavior of our API.</p>

      <div class="scan-row">
        <input type="text" id="scan-url" placeholder="Enter a URL (e.g., https://example.com)">
        <button class="btn primary" id="btn-scan">Scan</button>
      </div>

      <div class="scan-error" id="scan-error" style="display:none"></div>

      <div class="verdict" id="scan-result" style="display:none">
        <div class="headline"><span id="verdict-icon"></span><span id="verdict-title"></span></div>
        <div class="conf-line">
          <span>Confidence:</span>
          <div class="conf-track"><div class="conf-fill" id="conf-fill"></div></div>
          <span id="conf-pct"></span>
        </div>
        <div id="verdict-summary"></div>
        <div class="note">Simulated verdict — produced by the built-in demo classifier, not the live model.</div>
      </div>
    </div>

    <div class="card">
      <h2>Scan Activity (Last 30 Days)</h2>
      <div class="stats-grid" id="activity-grid">
        <div class="stat-card"><div class="value" id="stat-scans">—</div><div class="label">Total Scans</div></div>
        <div class="stat-card"><div class="value red" id="stat-phishing">—</div><div class="label">Phishing Verdicts</div></div>
        <div class="stat-card"><div class="value yellow" id="stat-rate">—</div><div class="label">Phishing Rate</div></div>
        <div class="stat-card"><div class="value green" id="stat-confidence">—</div><div class="label">Avg Confidence</div></div>
      </div>
      <div class="chart" id="activity-chart"></div>
      <div class="guide-text muted" id="source-line"></div>
      <div class="empty" id="activity-empty" style="display:none">
        <div class="icon">📊</div>
        <p>No scans logged yet. Scan a URL above, or run <code>phishguard scan</code> from a terminal.</p>
      </div>
    </div>
  </div>

  <!-- Model Panel -->
  <div class="panel" id="panel-model">
    <div class="card">
      <h2>Model Performance</h2>
      <p class="lead">Our machine learning model has been trained and tested on a dataset
      of both legitimate and phishing websites. Below are the key performance metrics
      that demonstrate the effectiveness of our detection system.</p>

      <div class="stats-grid">
        <div class="stat-card">
          <div class="value green" id="stat-accuracy">—</div>
          <div class="label">Accuracy</div>
          <div class="sub">Percentage of correctly identified websites</div>
        </div>
        <div class="stat-card">
          <div class="value" id="stat-precision">—</div>
          <div class="label">Precision</div>
          <div class="sub">True positives / (True positives + False positives)</div>
        </div>
        <div class="stat-card">
          <div class="value cyan" id="stat-recall">—</div>
          <div class="label">Recall</div>
          <div class="sub">True positives / (True positives + False negatives)</div>
        </div>
        <div class="stat-card">
          <div class="value purple" id="stat-f1">—</div>
          <div class="label">F1 Score</div>
          <div class="sub">Harmonic mean of precision and recall</div>
        </div>
      </div>
    </div>

    <div class="card">
      <h2>Prediction Breakdown</h2>
      <table class="cm-table">
        <thead>
          <tr>
            <th></th>
            <th class="num">Predicted Phishing</th>
            <th class="num">Predicted Legitimate</th>
          </tr>
        </thead>
        <tbody>
          <tr>
            <td>Actual Phishing</td>
            <td class="num good" id="cm-tp">—</td>
            <td class="num badv" id="cm-fn">—</td>
          </tr>
          <tr>
            <td>Actual Legitimate</td>
            <td class="num badv" id="cm-fp">—</td>
            <td class="num good" id="cm-tn">—</td>
          </tr>
        </tbody>
      </table>
      <div class="cm-note" id="cm-note"></div>
    </div>

    <div class="card">
      <h2>Interpretation</h2>
      <p class="guide-text">Our model achieves high accuracy (<span class="v-acc">—</span>)
      in detecting phishing websites, with a strong balance between precision and recall.</p>
      <ul class="steps">
        <li><strong>Precision of <span class="v-prec">—</span></strong> means that when our
        model flags a website as phishing, it's correct <span class="v-prec">—</span> of the time.</li>
        <li><strong>Recall of <span class="v-rec">—</span></strong> means that our model
        successfully identifies <span class="v-rec">—</span> of all actual phishing websites.</li>
        <li><strong>False positive rate of <span class="v-fp">—</span></strong> means that only
        <span class="v-fp">—</span> of legitimate websites are incorrectly flagged as phishing.</li>
      </ul>
    </div>

    <div class="card">
      <h2>Feature Importance</h2>
      <p class="lead">Our model uses various features extracted from URLs and website content
      to identify phishing attempts. The chart below shows the relative importance of each
      feature in the prediction process.</p>
      <div id="importance-rows"></div>
    </div>
  </div>

  <!-- Guide Panel -->
  <div class="panel" id="panel-guide">
    <div class="card">
      <h2>Getting Started</h2>
      <p class="lead">PhishGuard consists of three main components: a machine learning model,
      a Flask API, and a Chrome extension. Follow the steps below to set up and use each component.</p>
      <div class="pipeline">
        <div class="stage"><span class="icon">🧠</span>ML Model</div>
        <span>→</span>
        <div class="stage"><span class="icon">🖥</span>Flask API</div>
        <span>→</span>
        <div class="stage"><span class="icon">🌐</span>Chrome Extension</div>
      </div>
    </div>

    <div class="card">
      <h2>1. Setting Up the Model</h2>
      <p class="guide-text">The model training script is already prepared. You just need to
      install the required dependencies and run it.</p>
      <div class="code"># Install required Python packages
pip install pandas numpy scikit-learn xgboost joblib

# Train the model
python model/train_model.py</div>
      <p class="guide-text muted">This will create a sample dataset, train the XGBoost model,
      and save it to the <code>model/saved</code> directory.</p>
    </div>

    <div class="card">
      <h2>2. Starting the Flask API</h2>
      <p class="guide-text">The Flask API serves the model via a RESTful interface. It has
      endpoints for prediction and feature importance.</p>
      <div class="code"># Install required packages
pip install flask flask-cors

# Start the API server
python api/app.py</div>
      <p class="guide-text muted">The API will be available at <code>http://localhost:5000</code>.
      You can test it by visiting this URL in your browser.</p>
    </div>

    <div class="card">
      <h2>3. Installing the Chrome Extension</h2>
      <p class="guide-text">The Chrome extension provides a user-friendly interface for
      scanning websites.</p>
      <ol class="steps">
        <li>Open Chrome and navigate to <code>chrome://extensions</code></li>
        <li>Enable "Developer mode" by toggling the switch in the top-right corner</li>
        <li>Click "Load unpacked" and select the <code>extension</code> directory</li>
        <li>The PhishGuard extension should now appear in your extensions list</li>
        <li>Click the extension icon in the toolbar to scan the current website</li>
      </ol>
      <div class="note-box"><strong>Important Note:</strong> Make sure the Flask API is running
      before using the Chrome extension. The extension needs the API to analyze websites.</div>
    </div>

    <div class="card">
      <h2>Using the Extension</h2>
      <p class="guide-text">Once installed, using the PhishGuard extension is simple:</p>
      <ol class="steps">
        <li>Navigate to any website you want to check</li>
        <li>Click the PhishGuard icon in your browser toolbar</li>
        <li>Click the "Scan Website" button in the popup</li>
        <li>Review the results, which will show whether the site appears legitimate or suspicious</li>
        <li>Click "View Details" to see what specific features contributed to the classification</li>
      </ol>
      <p class="guide-text muted">The extension will color-code results: green for safe websites
      and red for potential phishing attempts. It also shows a confidence score to indicate how
      certain the model is about its prediction.</p>
    </div>

    <div class="card">
      <h2>Using the CLI</h2>
      <p class="guide-text">The same scan flow is available from a terminal:</p>
      <div class="code"># Scan a URL against the prediction API
phishguard scan https://example.com --details

# Try the offline demo classifier
phishguard demo https://secure-login.example.com

# Check that everything is wired up
phishguard health</div>
    </div>
  </div>

</div>

<!-- Toast -->
<div class="toast" id="toast"></div>

<script>
// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------
let currentPanel = 'home';
let historyData = null;
let modelData = null;
let importanceData = null;

// ---------------------------------------------------------------------------
// API helpers
// ---------------------------------------------------------------------------
async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  return res.json();
}

function toast(msg, isError) {
  const el = document.getElementById('toast');
  el.textContent = msg;
  el.className = 'toast show' + (isError ? ' error' : '');
  setTimeout(() => el.className = 'toast', 3000);
}

function fmt(n) {
  if (n === undefined || n === null) return '—';
  return n.toLocaleString();
}

function pct(n) {
  if (n === undefined || n === null) return '—';
  return n.toFixed(1) + '%';
}

function wholePct(n) {
  if (n === undefined || n === null) return '—';
  return Math.round(n * 100) + '%';
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------
document.getElementById('nav').addEventListener('click', e => {
  if (e.target.tagName !== 'BUTTON') return;
  const panel = e.target.dataset.panel;
  if (!panel) return;

  document.querySelectorAll('nav button').forEach(b => b.classList.remove('active'));
  e.target.classList.add('active');

  document.querySelectorAll('.panel').forEach(p => p.classList.remove('active'));
  document.getElementById('panel-' + panel).classList.add('active');

  currentPanel = panel;
  loadPanel(panel);
});

// ---------------------------------------------------------------------------
// Load panel data
// ---------------------------------------------------------------------------
async function loadPanel(panel) {
  switch (panel) {
    case 'home': return loadActivity();
    case 'model': return loadModel();
    case 'guide': return; // static content
  }
}

// ---------------------------------------------------------------------------
// Demo scan
// ---------------------------------------------------------------------------
async function runScan() {
  const input = document.getElementById('scan-url');
  const url = input.value.trim();
  const errBox = document.getElementById('scan-error');
  const resultBox = document.getElementById('scan-result');

  errBox.style.display = 'none';
  resultBox.style.display = 'none';

  if (!url) {
    errBox.textContent = 'Please enter a URL';
    errBox.style.display = 'block';
    return;
  }

  const btn = document.getElementById('btn-scan');
  btn.disabled = true;
  btn.textContent = 'Scanning…';

  try {
    const res = await fetch('/api/scan', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ url }),
    });
    const data = await res.json();
    if (!res.ok) {
      errBox.textContent = data.error || 'Scan failed';
      errBox.style.display = 'block';
    } else {
      renderVerdict(data);
      loadActivity();
    }
  } catch (e) {
    errBox.textContent = 'Scan failed: ' + e.message;
    errBox.style.display = 'block';
  }

  btn.disabled = false;
  btn.textContent = 'Scan';
}

function renderVerdict(r) {
  const box = document.getElementById('scan-result');
  const ok = r.result === 'legitimate';

  box.className = 'verdict ' + (ok ? 'ok' : 'bad');
  document.getElementById('verdict-icon').textContent = ok ? '✓' : '⚠';
  document.getElementById('verdict-title').textContent =
    ok ? 'Website appears safe' : 'Potential phishing detected';
  document.getElementById('verdict-summary').textContent = ok
    ? 'This website appears to be legitimate based on our analysis.'
    : 'This website shows characteristics commonly associated with phishing attempts. Be cautious!';
  document.getElementById('conf-fill').style.width = r.confidence_pct + '%';
  document.getElementById('conf-pct').textContent = r.confidence_pct + '%';

  box.style.display = 'block';
}

document.getElementById('btn-scan').addEventListener('click', runScan);
document.getElementById('scan-url').addEventListener('keydown', e => {
  if (e.key === 'Enter') runScan();
});

// ---------------------------------------------------------------------------
// Scan activity
// ---------------------------------------------------------------------------
async function loadActivity() {
  try {
    historyData = await api('GET', '/api/history?days=30');
    renderActivity();
  } catch (e) {
    toast('Failed to load scan history: ' + e.message, true);
  }
}

function renderActivity() {
  const h = historyData;
  document.getElementById('stat-scans').textContent = fmt(h.total_scans);
  document.getElementById('stat-phishing').textContent = fmt(h.phishing_count);
  document.getElementById('stat-rate').textContent = pct(h.phishing_rate_pct);
  document.getElementById('stat-confidence').textContent = pct(h.avg_confidence_pct);

  const chart = document.getElementById('activity-chart');
  const empty = document.getElementById('activity-empty');
  const sourceLine = document.getElementById('source-line');
  const daily = h.daily || [];

  if (h.total_scans === 0) {
    chart.innerHTML = '';
    sourceLine.textContent = '';
    empty.style.display = 'block';
    return;
  }
  empty.style.display = 'none';

  const maxScans = Math.max(...daily.map(d => d.scans), 1);

  chart.innerHTML = daily.map(d => {
    const hgt = Math.max((d.scans / maxScans) * 100, 2);
    const label = d.date.slice(5); // MM-DD
    return `
      <div class="bar-group">
        <div class="bar" style="height:${hgt}%">
          <div class="chart-tooltip">${d.date}: ${fmt(d.scans)} scans, ${fmt(d.phishing)} phishing</div>
        </div>
        <div class="bar-label">${label}</div>
      </div>
    `;
  }).join('');

  const s = h.sources || {};
  sourceLine.textContent =
    'Sources: ' + fmt(s.api) + ' via prediction API · ' + fmt(s.demo) + ' via demo simulator';
}

// ---------------------------------------------------------------------------
// Model performance
// ---------------------------------------------------------------------------
async function loadModel() {
  try {
    modelData = await api('GET', '/api/model');
    importanceData = await api('GET', '/api/importance');
    renderModel();
  } catch (e) {
    toast('Failed to load model data: ' + e.message, true);
  }
}

function renderModel() {
  const m = modelData.metrics;
  const cm = modelData.confusion;

  document.getElementById('stat-accuracy').textContent = wholePct(m.accuracy);
  document.getElementById('stat-precision').textContent = wholePct(m.precision);
  document.getElementById('stat-recall').textContent = wholePct(m.recall);
  document.getElementById('stat-f1').textContent = wholePct(m.f1_score);

  document.getElementById('cm-tp').textContent = fmt(cm.true_positives);
  document.getElementById('cm-tn').textContent = fmt(cm.true_negatives);
  document.getElementById('cm-fp').textContent = fmt(cm.false_positives);
  document.getElementById('cm-fn').textContent = fmt(cm.false_negatives);

  const total = cm.true_positives + cm.true_negatives + cm.false_positives + cm.false_negatives;
  const correct = cm.true_positives + cm.true_negatives;
  document.getElementById('cm-note').textContent =
    Math.round((correct / total) * 100) + '% accuracy on ' + total + ' test samples';

  document.querySelectorAll('.v-acc').forEach(el => el.textContent = wholePct(m.accuracy));
  document.querySelectorAll('.v-prec').forEach(el => el.textContent = wholePct(m.precision));
  document.querySelectorAll('.v-rec').forEach(el => el.textContent = wholePct(m.recall));
  document.querySelectorAll('.v-fp').forEach(el => el.textContent = wholePct(m.false_positive_rate));

  const rows = importanceData || [];
  const maxImp = Math.max(...rows.map(r => r.importance), 0.01);
  document.getElementById('importance-rows').innerHTML = rows.map(r => `
    <div class="imp-row">
      <div class="imp-label"><span class="mono">${esc(r.feature)}</span><span class="desc">${esc(r.description)}</span></div>
      <div class="imp-track"><div class="imp-fill" style="width:${((r.importance / maxImp) * 100).toFixed(0)}%"></div></div>
      <div class="imp-value">${(r.importance * 100).toFixed(0)}%</div>
    </div>
  `).join('');
}

// ---------------------------------------------------------------------------
// Health badges
// ---------------------------------------------------------------------------
async function loadHealth() {
  try {
    const h = await api('GET', '/api/health');
    const badges = document.getElementById('health-badges');
    badges.innerHTML = [
      badge('API', h.api_reachable ? 'ok' : 'err'),
      badge('Config', h.config_exists ? 'ok' : 'warn'),
      badge(fmt(h.log_records) + ' scans logged', h.logging_enabled ? 'ok' : 'warn'),
    ].join('');
  } catch (e) {
    // Silently ignore health badge errors
  }
}

function badge(label, cls) {
  const dot = cls === 'ok' ? '●' : cls === 'warn' ? '○' : '✕';
  return `<span class="badge ${cls}">${dot} ${esc(label)}</span>`;
}

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------
function esc(s) {
  if (!s) return '';
  return s.replace(/&/g,'&amp;').replace(/</g,'&lt;').replace(/>/g,'&gt;').replace(/"/g,'&quot;');
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------
loadHealth();
loadActivity();
</script>
</body>
</html>"##;
