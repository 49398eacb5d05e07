use crate::models::{ChatMessage, OverviewResponse};
use serde::Serialize;

pub fn render_index(overview: &OverviewResponse, messages: &[ChatMessage]) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &overview.date.format("%d.%m.%Y").to_string())
        .replace("{{PROGRESS}}", &overview.progress.total_progress.to_string())
        .replace("{{OVERVIEW_JSON}}", &script_json(overview))
        .replace("{{CHAT_JSON}}", &script_json(messages))
}

/// JSON safe to inline inside a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Твой Путь Роста</title>
  <style>
    :root {
      --bg-1: #eef6f1;
      --bg-2: #dfe9fb;
      --ink: #1f2a2e;
      --muted: #6b7a80;
      --primary: #3b82f6;
      --growth: #22c55e;
      --calm: #8b5cf6;
      --energy: #f97316;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 18px 40px rgba(31, 42, 46, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffffff 50%, var(--bg-2));
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 32px 18px 48px;
    }

    main {
      max-width: 1180px;
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      text-align: center;
    }

    h1 {
      margin: 0;
      font-size: clamp(2rem, 4vw, 3rem);
    }

    .subtitle,
    .muted {
      color: var(--muted);
    }

    .grid {
      display: grid;
      gap: 20px;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 22px;
      display: grid;
      gap: 12px;
      align-content: start;
    }

    .card h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .ring {
      font-size: 3rem;
      font-weight: 700;
      color: var(--primary);
      text-align: center;
    }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: #e5e7eb;
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      background: var(--primary);
    }

    .row {
      display: flex;
      justify-content: space-between;
      gap: 8px;
      align-items: center;
    }

    .badge {
      border-radius: 999px;
      padding: 2px 10px;
      font-size: 0.8rem;
      background: #e0ecff;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    li.done span {
      text-decoration: line-through;
      color: var(--muted);
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    input,
    select,
    textarea {
      flex: 1;
      min-width: 120px;
      padding: 10px;
      border-radius: 12px;
      border: 1px solid #d1d5db;
      font: inherit;
    }

    textarea {
      min-height: 96px;
      width: 100%;
    }

    button {
      border: none;
      border-radius: 12px;
      padding: 10px 16px;
      background: var(--primary);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }

    button:disabled {
      opacity: 0.5;
      cursor: not-allowed;
    }

    .chat-log {
      max-height: 280px;
      overflow-y: auto;
      display: grid;
      gap: 8px;
    }

    .msg {
      padding: 8px 12px;
      border-radius: 12px;
      max-width: 85%;
    }

    .msg.user {
      justify-self: end;
      background: #dbeafe;
    }

    .msg.ai {
      justify-self: start;
      background: #ede9fe;
    }

    .status {
      min-height: 1.2em;
      color: #dc2626;
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Твой Путь Роста</h1>
      <p class="subtitle">Отслеживай прогресс и меняй жизнь каждый день · {{DATE}}</p>
    </header>

    <section class="grid">
      <article class="card">
        <h2>Общий Прогресс</h2>
        <div class="ring"><span id="progress">{{PROGRESS}}</span>%</div>
        <ul id="metric-list"></ul>
      </article>
      <article class="card">
        <div class="row"><h2 id="advice-title"></h2><span class="badge" id="advice-category"></span></div>
        <p id="advice-text"></p>
      </article>
    </section>

    <section class="grid" id="metric-cards"></section>

    <section class="grid">
      <article class="card">
        <div class="row"><h2>Задачи</h2><span class="badge" id="task-counter"></span></div>
        <input type="date" id="task-date" />
        <ul id="task-list"></ul>
        <form id="task-form">
          <input id="task-title" placeholder="Новая задача" />
          <input id="task-category" placeholder="Категория" />
          <button type="submit" id="task-submit" disabled>Добавить</button>
        </form>
      </article>

      <article class="card">
        <h2>Финансы</h2>
        <div class="row"><span>Доходы</span><strong id="total-income"></strong></div>
        <div class="row"><span>Расходы</span><strong id="total-expense"></strong></div>
        <div class="row"><span>Баланс</span><strong id="balance"></strong></div>
        <ul id="breakdown"></ul>
        <form id="tx-form">
          <select id="tx-type">
            <option value="expense">Расход</option>
            <option value="income">Доход</option>
          </select>
          <input id="tx-amount" type="number" min="0.01" step="0.01" placeholder="Сумма" />
          <select id="tx-category"></select>
          <input id="tx-description" placeholder="Описание" />
          <button type="submit" id="tx-submit" disabled>Добавить</button>
        </form>
      </article>
    </section>

    <section class="grid">
      <article class="card">
        <h2>Личный Дневник</h2>
        <p class="muted">Записывай свои мысли и наблюдения</p>
        <textarea id="journal-text" placeholder="Что я узнал сегодня? Какие инсайты получил? Что хочу изменить?"></textarea>
        <button id="journal-save" disabled>Сохранить запись</button>
        <h3>История (<span id="journal-count">0</span>)</h3>
        <ul id="journal-list"></ul>
      </article>

      <article class="card">
        <h2>AI Ментор</h2>
        <div class="chat-log" id="chat-log"></div>
        <div class="row">
          <button data-quick="0">Мотивация</button>
          <button data-quick="1">Совет на сегодня</button>
        </div>
        <form id="chat-form">
          <input id="chat-text" placeholder="Спроси ментора..." />
          <button type="submit" id="chat-submit" disabled>Отправить</button>
        </form>
      </article>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const CATEGORIES = {
      expense: ['Еда', 'Транспорт', 'Жильё', 'Развлечения', 'Здоровье', 'Образование', 'Другое'],
      income: ['Зарплата', 'Фриланс', 'Инвестиции', 'Подарки', 'Другое']
    };

    let overview = {{OVERVIEW_JSON}};
    let chat = {{CHAT_JSON}};

    const $ = (id) => document.getElementById(id);
    const statusEl = $('status');
    const money = (value) => Number(value).toLocaleString('ru-RU') + ' ₽';
    const escape = (text) => {
      const div = document.createElement('div');
      div.textContent = text;
      return div.innerHTML;
    };

    const setStatus = (message) => {
      statusEl.textContent = message || '';
    };

    const api = async (method, path, body) => {
      const res = await fetch(path, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const renderMetrics = () => {
      const { progress, advice } = overview;
      $('progress').textContent = progress.total_progress;
      $('metric-list').innerHTML = progress.metrics
        .map((m) => `<li class="row"><span>${escape(m.name)}</span><span class="muted">${m.value}%</span></li>`)
        .join('');
      $('metric-cards').innerHTML = progress.metrics
        .map((m) => `
          <article class="card">
            <div class="row"><h2>${escape(m.name)}</h2><span class="badge">${m.trend > 0 ? '+' : ''}${m.trend}%</span></div>
            <div class="row"><span class="muted">Прогресс</span><strong>${m.value}/${m.goal} ${escape(m.unit)}</strong></div>
            <div class="bar"><span style="width:${m.value}%"></span></div>
          </article>`)
        .join('');
      $('advice-title').textContent = advice.title;
      $('advice-category').textContent = advice.category;
      $('advice-text').textContent = advice.text;
    };

    const renderTasks = () => {
      const { tasks } = overview;
      $('task-date').value = tasks.selected_date;
      $('task-counter').textContent = `${tasks.completed}/${tasks.total}`;
      $('task-list').innerHTML = tasks.tasks
        .map((t) => `
          <li class="row ${t.completed ? 'done' : ''}">
            <label><input type="checkbox" data-task="${t.id}" ${t.completed ? 'checked' : ''} /> <span>${escape(t.title)}</span></label>
            <span class="badge">${escape(t.category)}</span>
          </li>`)
        .join('');
    };

    const renderFinance = () => {
      const { finance } = overview;
      $('total-income').textContent = money(finance.total_income);
      $('total-expense').textContent = money(finance.total_expense);
      $('balance').textContent = money(finance.balance);
      $('breakdown').innerHTML = finance.category_breakdown
        .map((c) => `
          <li>
            <div class="row"><span>${escape(c.category)}</span><span class="muted">${money(c.amount)} · ${c.share.toFixed(1)}%</span></div>
            <div class="bar"><span style="width:${c.share}%"></span></div>
          </li>`)
        .join('');
    };

    const renderJournal = () => {
      const { journal } = overview;
      const today = new Date().toLocaleDateString('ru-RU');
      $('journal-count').textContent = journal.count;
      $('journal-list').innerHTML = journal.entries.length === 0
        ? '<li class="muted">Пока нет записей. Начните вести дневник!</li>'
        : journal.entries
            .map((e) => `<li class="card"><span>${escape(e)}</span><span class="muted">${today}</span></li>`)
            .join('');
    };

    const renderChat = () => {
      const log = $('chat-log');
      log.innerHTML = chat
        .map((m) => `<div class="msg ${m.sender}">${escape(m.text)}</div>`)
        .join('');
      log.scrollTop = log.scrollHeight;
    };

    const renderAll = () => {
      if (!overview) {
        return;
      }
      renderMetrics();
      renderTasks();
      renderFinance();
      renderJournal();
      renderChat();
    };

    const refresh = async () => {
      overview = await api('GET', '/api/overview');
      renderAll();
    };

    const refreshChat = async () => {
      chat = await api('GET', '/api/chat');
      renderChat();
    };

    const fillCategories = () => {
      const type = $('tx-type').value;
      $('tx-category').innerHTML = CATEGORIES[type]
        .map((c) => `<option value="${c}">${c}</option>`)
        .join('');
    };

    const bindEnabled = (inputId, buttonId, check) => {
      const update = () => {
        $(buttonId).disabled = !check($(inputId).value);
      };
      $(inputId).addEventListener('input', update);
      return update;
    };

    const hasText = (value) => value.trim().length > 0;
    const updateTaskButton = bindEnabled('task-title', 'task-submit', hasText);
    const updateTxButton = bindEnabled('tx-amount', 'tx-submit', (value) => Number(value) > 0);
    const updateJournalButton = bindEnabled('journal-text', 'journal-save', hasText);
    const updateChatButton = bindEnabled('chat-text', 'chat-submit', hasText);

    const run = (action) => action().catch((err) => setStatus(err.message));

    $('task-form').addEventListener('submit', (event) => {
      event.preventDefault();
      run(async () => {
        await api('POST', '/api/tasks', {
          title: $('task-title').value,
          category: $('task-category').value || null
        });
        $('task-title').value = '';
        updateTaskButton();
        await refresh();
      });
    });

    $('task-list').addEventListener('change', (event) => {
      const id = event.target.dataset.task;
      if (id) {
        run(async () => {
          await api('POST', `/api/tasks/${id}/toggle`);
          await refresh();
        });
      }
    });

    $('task-date').addEventListener('change', (event) => {
      run(async () => {
        await api('PUT', '/api/tasks/date', { date: event.target.value });
        await refresh();
      });
    });

    $('tx-type').addEventListener('change', fillCategories);

    $('tx-form').addEventListener('submit', (event) => {
      event.preventDefault();
      run(async () => {
        await api('POST', '/api/transactions', {
          type: $('tx-type').value,
          amount: $('tx-amount').value,
          category: $('tx-category').value,
          description: $('tx-description').value || null
        });
        $('tx-amount').value = '';
        $('tx-description').value = '';
        updateTxButton();
        await refresh();
      });
    });

    $('journal-save').addEventListener('click', () => {
      run(async () => {
        await api('POST', '/api/journal', { text: $('journal-text').value });
        $('journal-text').value = '';
        updateJournalButton();
        await refresh();
      });
    });

    const afterSend = async () => {
      await refreshChat();
      setTimeout(() => run(refreshChat), 1200);
    };

    $('chat-form').addEventListener('submit', (event) => {
      event.preventDefault();
      run(async () => {
        await api('POST', '/api/chat', { text: $('chat-text').value });
        $('chat-text').value = '';
        updateChatButton();
        await afterSend();
      });
    });

    document.querySelectorAll('[data-quick]').forEach((button) => {
      button.addEventListener('click', () => {
        run(async () => {
          await api('POST', `/api/chat/quick/${button.dataset.quick}`);
          await afterSend();
        });
      });
    });

    fillCategories();
    if (overview) {
      renderAll();
    } else {
      run(refresh);
    }
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::overview::build_overview_at;
    use chrono::NaiveDate;

    #[test]
    fn page_embeds_state_without_breaking_script() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
        let mut dashboard = Dashboard::new(today);
        dashboard.add_journal_entry("</script><b>hi</b>").unwrap();

        let html = render_index(&build_overview_at(today, &dashboard), &[]);
        assert!(html.contains("14.02.2026"));
        assert!(html.contains(r#"<span id="progress">80</span>"#));
        assert!(html.contains(r"\u003c/script>\u003cb>hi\u003c/b>"));
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(!html.contains("{{"));
    }
}
