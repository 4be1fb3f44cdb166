use crate::models::{Metric, Status};

pub fn render_index() -> String {
    let buttons: String = Status::ALL
        .iter()
        .map(|status| {
            format!(
                r#"<button class="status-btn" type="button" data-status="{label}">{label}</button>"#,
                label = status.as_str()
            )
        })
        .collect();

    INDEX_HTML
        .replace("{{STYLE}}", BASE_STYLE)
        .replace("{{STATUS_BUTTONS}}", &buttons)
        .replace("{{METRIC_HEADERS}}", &metric_headers())
}

pub fn render_detail() -> String {
    DETAIL_HTML
        .replace("{{STYLE}}", BASE_STYLE)
        .replace("{{METRIC1_OPTIONS}}", &metric_options(Metric::Impressions))
        .replace("{{METRIC2_OPTIONS}}", &metric_options(Metric::Clicks))
        .replace("{{METRIC_HEADERS}}", &metric_headers())
}

pub fn render_legacy() -> String {
    LEGACY_HTML.replace("{{STYLE}}", BASE_STYLE)
}

fn metric_headers() -> String {
    Metric::ALL
        .iter()
        .map(|metric| format!("<th>{}</th>", metric.label()))
        .collect()
}

fn metric_options(selected: Metric) -> String {
    Metric::ALL
        .iter()
        .map(|&metric| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                metric.key(),
                if metric == selected { " selected" } else { "" },
                metric.label()
            )
        })
        .collect()
}

const BASE_STYLE: &str = r##"
    :root {
      --bg-1: #f6f8fb;
      --bg-2: #dfe9f5;
      --ink: #22303c;
      --accent: #3498db;
      --accent-2: #2ecc71;
      --muted: #7a8699;
      --card: #ffffff;
      --line: rgba(34, 48, 60, 0.1);
      --shadow: 0 18px 44px rgba(34, 48, 60, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 55%), var(--bg-1);
      color: var(--ink);
      font-family: "PingFang SC", "Microsoft YaHei", "Segoe UI", sans-serif;
      padding: 28px 20px 48px;
    }

    .app {
      max-width: 1280px;
      margin: 0 auto;
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 28px;
      display: grid;
      gap: 22px;
    }

    header h1 {
      margin: 0 0 4px;
      font-size: 1.6rem;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
      font-size: 0.95rem;
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    .status-btn {
      appearance: none;
      border: 1px solid var(--line);
      border-radius: 999px;
      background: transparent;
      color: var(--muted);
      padding: 8px 16px;
      font-size: 0.9rem;
      font-weight: 600;
      cursor: pointer;
      transition: background 150ms ease, color 150ms ease;
    }

    .status-btn.active {
      background: var(--accent);
      border-color: var(--accent);
      color: white;
    }

    .search {
      margin-left: auto;
      border: 1px solid var(--line);
      border-radius: 999px;
      padding: 8px 16px;
      font-size: 0.9rem;
      min-width: 220px;
    }

    .table-wrap {
      overflow-x: auto;
      border: 1px solid var(--line);
      border-radius: 12px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.85rem;
      white-space: nowrap;
    }

    th, td {
      padding: 10px 12px;
      text-align: right;
      border-bottom: 1px solid var(--line);
    }

    th:first-child, td:first-child,
    th:nth-child(2), td:nth-child(2) {
      text-align: left;
    }

    thead th {
      position: sticky;
      top: 0;
      background: var(--card);
      color: var(--muted);
      font-weight: 600;
    }

    tbody tr[data-id] {
      cursor: pointer;
    }

    tbody tr:hover {
      background: rgba(52, 152, 219, 0.06);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
      gap: 14px;
    }

    .stat {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 14px;
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.25rem;
      font-weight: 600;
    }

    .stat .change.up {
      color: #2d7a4b;
    }

    .stat .change.down {
      color: #c63b2b;
    }

    .stat .change.flat {
      color: var(--muted);
    }

    .chart-card {
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 14px;
    }

    .chart-toolbar {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
      margin-bottom: 10px;
    }

    .chart-toolbar select {
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 6px 10px;
      font-size: 0.9rem;
    }

    svg.chart {
      width: 100%;
      height: auto;
      display: block;
    }

    .chart-line-1 {
      fill: none;
      stroke: var(--accent);
      stroke-width: 2.5;
    }

    .chart-line-2 {
      fill: none;
      stroke: var(--accent-2);
      stroke-width: 2.5;
    }

    .chart-point-1 {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-point-2 {
      fill: white;
      stroke: var(--accent-2);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(34, 48, 60, 0.08);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 10px;
    }

    .chart-axis-1 {
      fill: var(--accent);
      font-size: 10px;
    }

    .chart-axis-2 {
      fill: var(--accent-2);
      font-size: 10px;
    }

    .status-note {
      min-height: 1.2em;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .status-note[data-type="error"] {
      color: #c63b2b;
    }

    a.back {
      color: var(--accent);
      text-decoration: none;
      font-size: 0.9rem;
    }
"##;

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>素材数据总览</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>素材数据总览</h1>
      <p class="subtitle">按投放状态筛选素材，或按素材ID精确搜索。点击任意行查看详情。</p>
    </header>

    <section class="toolbar">
      <div id="statusButtons" style="display:contents">{{STATUS_BUTTONS}}</div>
      <input id="searchInput" class="search" type="text" placeholder="按素材ID搜索" autocomplete="off" />
    </section>

    <section class="table-wrap">
      <table>
        <thead>
          <tr>
            <th>素材ID</th>
            <th>当前状态</th>
            {{METRIC_HEADERS}}
          </tr>
        </thead>
        <tbody id="dataTableBody"></tbody>
      </table>
    </section>

    <div class="status-note" id="status"></div>
  </main>

  <script>
    const tableBody = document.getElementById('dataTableBody');
    const statusButtons = document.getElementById('statusButtons');
    const searchInput = document.getElementById('searchInput');
    const statusEl = document.getElementById('status');

    // Only the newest request may render; stale responses are dropped.
    let requestSeq = 0;

    const setNote = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const setRows = (rows) => {
      tableBody.innerHTML = rows.map((row) => `
        <tr data-id="${row.id}">
          <td>${row.id}</td>
          <td>${row.status}</td>
          ${row.cells.map((cell) => `<td>${cell}</td>`).join('')}
        </tr>
      `).join('');
    };

    const loadRows = async (params, { alertOnError = false } = {}) => {
      const token = ++requestSeq;
      setNote('加载中...', '');
      try {
        const res = await fetch(`/api/materials?${params}`);
        if (!res.ok) {
          throw new Error((await res.text()) || 'request failed');
        }
        const data = await res.json();
        if (token !== requestSeq) {
          return;
        }
        setRows(data.rows);
        setNote(`共 ${data.rows.length} 条`, '');
      } catch (err) {
        if (token !== requestSeq) {
          return;
        }
        console.error(err);
        if (alertOnError) {
          setNote('', '');
          alert('数据加载失败，请稍后重试');
        } else {
          setRows([]);
          setNote('未找到数据', 'error');
        }
      }
    };

    const loadDataByStatus = (status) =>
      loadRows(`status=${encodeURIComponent(status)}`, { alertOnError: true });

    const searchById = (id) => loadRows(`id=${encodeURIComponent(id)}`);

    statusButtons.addEventListener('click', (event) => {
      if (!event.target.classList.contains('status-btn')) {
        return;
      }
      document.querySelectorAll('.status-btn').forEach((btn) => {
        btn.classList.remove('active');
      });
      event.target.classList.add('active');
      loadDataByStatus(event.target.dataset.status);
    });

    let searchTimer = null;
    searchInput.addEventListener('input', (event) => {
      if (searchTimer) {
        clearTimeout(searchTimer);
      }
      searchTimer = setTimeout(() => {
        const value = event.target.value.trim();
        if (value === '') {
          const active = document.querySelector('.status-btn.active');
          loadDataByStatus(active.dataset.status);
        } else {
          searchById(value);
        }
      }, 300);
    });

    tableBody.addEventListener('click', (event) => {
      const row = event.target.closest('tr[data-id]');
      if (row) {
        window.location.href = `/data/detail.html?id=${encodeURIComponent(row.dataset.id)}`;
      }
    });

    // default view: the first status
    statusButtons.querySelector('.status-btn').click();
  </script>
</body>
</html>
"##;

const DETAIL_HTML: &str = r##"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>素材数据详情</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <a class="back" href="/">&larr; 返回总览</a>
      <h1>素材数据详情</h1>
      <p class="subtitle">素材 <span id="materialId">-</span> · 当前状态 <span id="materialStatus">-</span></p>
    </header>

    <section class="panel" id="overviewData"></section>

    <section class="chart-card">
      <div class="chart-toolbar">
        <label for="metric1">指标一</label>
        <select id="metric1">{{METRIC1_OPTIONS}}</select>
        <label for="metric2">指标二</label>
        <select id="metric2">{{METRIC2_OPTIONS}}</select>
      </div>
      <svg id="trendChart" class="chart" viewBox="0 0 640 280" role="img" aria-label="趋势图"></svg>
    </section>

    <section class="table-wrap">
      <table>
        <thead>
          <tr>
            <th>记录时间</th>
            <th>状态</th>
            {{METRIC_HEADERS}}
          </tr>
        </thead>
        <tbody id="detailTableBody"></tbody>
      </table>
    </section>
  </main>

  <script>
    const overviewEl = document.getElementById('overviewData');
    const tableBody = document.getElementById('detailTableBody');
    const chartEl = document.getElementById('trendChart');
    const metric1Select = document.getElementById('metric1');
    const metric2Select = document.getElementById('metric2');

    const CHART_W = 640;
    const CHART_H = 280;
    const PAD_X = 60;
    const PAD_TOP = 28;
    const PAD_BOTTOM = 42;
    const TICKS = 4;

    const formatTick = (value, kind) => {
      if (kind === 'rate') {
        const pct = value * 100;
        return pct < 1 ? '0%' : `${Math.round(pct)}%`;
      }
      if (kind === 'currency') {
        return `¥${value.toFixed(2)}`;
      }
      if (kind === 'ratio') {
        return value.toFixed(2);
      }
      return Math.round(value).toLocaleString();
    };

    const arrowOf = (direction) =>
      direction === 'up' ? '↑' : direction === 'down' ? '↓' : '-';

    const renderOverview = (cards) => {
      overviewEl.innerHTML = cards.map((card) => `
        <div class="stat">
          <span class="label">${card.label}</span>
          <span class="value">${card.value}</span>
          <span class="change ${card.direction}">${arrowOf(card.direction)} ${card.change}</span>
        </div>
      `).join('');
    };

    const renderTable = (rows) => {
      tableBody.innerHTML = rows.map((row) => `
        <tr>
          <td>${row.date}</td>
          <td>${row.status}</td>
          ${row.cells.map((cell) => `<td>${cell}</td>`).join('')}
        </tr>
      `).join('');
    };

    const scaleOf = (values) => {
      let min = Math.min(...values);
      let max = Math.max(...values);
      if (!Number.isFinite(min) || !Number.isFinite(max)) {
        min = 0;
        max = 1;
      }
      if (min === max) {
        min -= 1;
        max += 1;
      }
      return { min, max };
    };

    // Pure function of (payload, metric1, metric2): redraws the whole SVG,
    // no retained chart instance. The viewBox keeps it responsive.
    const renderChart = (chart, key1, key2) => {
      const first = chart.series.find((s) => s.key === key1);
      const second = chart.series.find((s) => s.key === key2);
      if (!first || !second || chart.labels.length === 0) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">暂无数据</text>';
        return;
      }

      const n = chart.labels.length;
      const xStep = n > 1 ? (CHART_W - PAD_X * 2) / (n - 1) : 0;
      const x = (i) => PAD_X + i * xStep;
      const plotter = (scale) => {
        const span = scale.max - scale.min;
        return (value) =>
          CHART_H - PAD_BOTTOM - ((value - scale.min) / span) * (CHART_H - PAD_TOP - PAD_BOTTOM);
      };

      const scale1 = scaleOf(first.values);
      const scale2 = scaleOf(second.values);
      const y1 = plotter(scale1);
      const y2 = plotter(scale2);

      let grid = '';
      for (let i = 0; i <= TICKS; i += 1) {
        const v1 = scale1.min + ((scale1.max - scale1.min) * i) / TICKS;
        const v2 = scale2.min + ((scale2.max - scale2.min) * i) / TICKS;
        const yPos = y1(v1);
        grid += `<line class="chart-grid" x1="${PAD_X}" y1="${yPos}" x2="${CHART_W - PAD_X}" y2="${yPos}" />`;
        grid += `<text class="chart-axis-1" x="${PAD_X - 8}" y="${yPos + 3}" text-anchor="end">${formatTick(v1, first.kind)}</text>`;
        grid += `<text class="chart-axis-2" x="${CHART_W - PAD_X + 8}" y="${yPos + 3}" text-anchor="start">${formatTick(v2, second.kind)}</text>`;
      }

      const pathOf = (values, y) => values
        .map((value, i) => `${i === 0 ? 'M' : 'L'} ${x(i).toFixed(2)} ${y(value).toFixed(2)}`)
        .join(' ');

      const pointsOf = (values, y, cls) => values
        .map((value, i) => `<circle class="${cls}" cx="${x(i)}" cy="${y(value)}" r="3.5" />`)
        .join('');

      const labelEvery = Math.max(1, Math.ceil(n / 10));
      const xLabels = chart.labels
        .map((label, i) => {
          if (i % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${x(i)}" y="${CHART_H - PAD_BOTTOM + 16}" text-anchor="middle">${label}</text>`;
        })
        .join('');

      const legend = `
        <circle cx="${PAD_X}" cy="12" r="4" class="chart-point-1" />
        <text class="chart-axis-1" x="${PAD_X + 10}" y="15">${first.label}</text>
        <circle cx="${PAD_X + 150}" cy="12" r="4" class="chart-point-2" />
        <text class="chart-axis-2" x="${PAD_X + 160}" y="15">${second.label}</text>
      `;

      chartEl.innerHTML = `
        ${grid}
        <path class="chart-line-1" d="${pathOf(first.values, y1)}" />
        <path class="chart-line-2" d="${pathOf(second.values, y2)}" />
        ${pointsOf(first.values, y1, 'chart-point-1')}
        ${pointsOf(second.values, y2, 'chart-point-2')}
        ${xLabels}
        ${legend}
      `;
    };

    const initPage = async () => {
      const params = new URLSearchParams(window.location.search);
      const materialId = params.get('id');
      if (!materialId) {
        alert('未找到素材ID');
        return;
      }

      let detail;
      try {
        const res = await fetch(`/api/materials/${encodeURIComponent(materialId)}`);
        if (!res.ok) {
          throw new Error((await res.text()) || 'request failed');
        }
        detail = await res.json();
      } catch (err) {
        console.error(err);
        alert('数据加载失败');
        return;
      }

      document.getElementById('materialId').textContent = detail.id;
      document.getElementById('materialStatus').textContent = detail.current_status;

      renderOverview(detail.overview);
      renderTable(detail.table);

      // metric changes redraw from the payload already in hand; no refetch
      const redraw = () => renderChart(detail.chart, metric1Select.value, metric2Select.value);
      metric1Select.addEventListener('change', redraw);
      metric2Select.addEventListener('change', redraw);
      redraw();
    };

    document.addEventListener('DOMContentLoaded', initPage);
  </script>
</body>
</html>
"##;

const LEGACY_HTML: &str = r##"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>数据看板</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>数据看板</h1>
      <p class="subtitle">最新投放数据与 ROI 变化趋势。</p>
    </header>

    <section class="panel" id="data-container"></section>

    <section class="chart-card" id="chart-container">
      <svg id="roiChart" class="chart" viewBox="0 0 640 260" role="img" aria-label="ROI 趋势"></svg>
    </section>

    <div class="status-note" id="status"></div>
  </main>

  <script>
    const dataContainer = document.getElementById('data-container');
    const chartEl = document.getElementById('roiChart');
    const statusEl = document.getElementById('status');

    const CHART_W = 640;
    const CHART_H = 260;
    const PAD_X = 52;
    const PAD_TOP = 20;
    const PAD_BOTTOM = 40;

    const renderLatest = (latest) => {
      const fields = [
        ['ID', latest.ID],
        ['ROI', latest.roi],
        ['总体点击量', latest.overall_clicks.toLocaleString()],
        ['总体展示次数', latest.overall_impressions.toLocaleString()],
        ['更新时间', latest.record_date],
      ];
      dataContainer.innerHTML = fields.map(([label, value]) => `
        <div class="stat">
          <span class="label">${label}</span>
          <span class="value">${value}</span>
        </div>
      `).join('');
    };

    const renderRoiChart = (points) => {
      if (points.length === 0) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">暂无数据</text>';
        return;
      }

      let min = Math.min(...points.map((p) => p.value));
      let max = Math.max(...points.map((p) => p.value));
      if (min === max) {
        min -= 1;
        max += 1;
      }

      const n = points.length;
      const xStep = n > 1 ? (CHART_W - PAD_X * 2) / (n - 1) : 0;
      const x = (i) => PAD_X + i * xStep;
      const y = (value) =>
        CHART_H - PAD_BOTTOM - ((value - min) / (max - min)) * (CHART_H - PAD_TOP - PAD_BOTTOM);

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = min + ((max - min) * i) / 4;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${PAD_X}" y1="${yPos}" x2="${CHART_W - PAD_X}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${PAD_X - 8}" y="${yPos + 3}" text-anchor="end">${value.toFixed(2)}</text>`;
      }

      const path = points
        .map((point, i) => `${i === 0 ? 'M' : 'L'} ${x(i).toFixed(2)} ${y(point.value).toFixed(2)}`)
        .join(' ');

      const labelEvery = Math.max(1, Math.ceil(n / 8));
      const xLabels = points
        .map((point, i) => {
          if (i % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${x(i)}" y="${CHART_H - PAD_BOTTOM + 16}" text-anchor="middle">${point.label}</text>`;
        })
        .join('');

      chartEl.innerHTML = `
        ${grid}
        <path class="chart-line-1" d="${path}" />
        ${xLabels}
      `;
    };

    const fetchDataAndDisplay = async () => {
      try {
        const res = await fetch('/api/legacy');
        if (!res.ok) {
          throw new Error('Network response was not ok');
        }
        const data = await res.json();
        if (data.length === 0) {
          statusEl.textContent = '暂无数据';
          return;
        }

        renderLatest(data[0]);

        // records arrive newest-first; chart wants chronological order
        const points = data
          .slice()
          .reverse()
          .map((item) => ({ label: item.record_date, value: item.roi }));
        renderRoiChart(points);
      } catch (err) {
        console.error(err);
        statusEl.textContent = '数据加载失败';
        statusEl.dataset.type = 'error';
      }
    };

    window.addEventListener('load', fetchDataAndDisplay);
  </script>
</body>
</html>
"##;
