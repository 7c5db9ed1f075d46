use super::{Workbench, SIDEBAR_MIN_MAIN_WIDTH, SIDEBAR_WIDTH, STATUS_HEIGHT};
use crate::app::preview;
use crate::app::theme::UiTheme;
use crate::kernel::assist::AssistAction;
use crate::kernel::{FocusTarget, PromptKind, ViewMode};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

const TAB_DISPLAY: &str = "    ";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub(super) fn render(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    let theme = UiTheme::for_mode(workbench.store.state().ui.theme);
    frame.render_widget(Block::default().style(theme.base()), area);
    if area.width == 0 || area.height == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
        .split(area);
    let (body, status) = (rows[0], rows[1]);

    let main = if workbench.sidebar_visible()
        && body.width >= SIDEBAR_WIDTH.saturating_add(SIDEBAR_MIN_MAIN_WIDTH)
    {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(body);
        workbench.render_sidebar(frame, cols[0], &theme);
        cols[1]
    } else {
        body
    };

    workbench.last_editor_area = None;
    let view_mode = workbench.store.state().ui.view_mode;
    match view_mode {
        ViewMode::Editor => workbench.render_editor(frame, main, &theme),
        ViewMode::Preview => workbench.render_preview(frame, main, &theme),
        ViewMode::Split => {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(main);
            workbench.render_editor(frame, panes[0], &theme);
            workbench.render_preview(frame, panes[1], &theme);
        }
    }

    workbench.render_status(frame, status, &theme);
}

impl Workbench {
    fn render_sidebar(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let state = self.store.state();
        let focused = state.ui.focus == FocusTarget::Sidebar && state.ui.prompt.is_none();
        let active_id = state.active.id();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Documents ({}) ", state.documents.len()))
            .border_style(theme.border(focused))
            .style(theme.base());

        let items = state
            .documents
            .list()
            .iter()
            .map(|doc| {
                let marker = if doc.id == active_id { "● " } else { "  " };
                let mut name_style = theme.base();
                if doc.id == active_id {
                    name_style = name_style.add_modifier(Modifier::BOLD);
                }
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, theme.base().fg(theme.accent_fg)),
                        Span::styled(doc.name.clone(), name_style),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", format_created(doc.created_at)),
                        theme.muted(),
                    )),
                ])
            })
            .collect::<Vec<_>>();

        let mut list_state = ListState::default();
        if focused {
            list_state.select(Some(state.ui.sidebar_selected));
        } else {
            list_state.select(Some(state.active_index()));
        }
        let highlight = if focused {
            theme.base().bg(theme.sidebar_selected_bg)
        } else {
            theme.base()
        };

        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_editor(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let state = self.store.state();
        let focused = state.ui.focus == FocusTarget::Editor && state.ui.prompt.is_none();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", state.active_document().name))
            .border_style(theme.border(focused))
            .style(theme.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.last_editor_area = Some(inner);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.viewport.doc_id != state.active.id() {
            self.viewport.doc_id = state.active.id().to_string();
            self.viewport.top = 0;
            self.viewport.left = 0;
        }

        let buffer = &state.buffer;
        let (cursor_line, cursor_col) = buffer.line_col(buffer.cursor());
        let height = inner.height as usize;
        let width = inner.width as usize;

        if cursor_line < self.viewport.top {
            self.viewport.top = cursor_line;
        } else if cursor_line >= self.viewport.top + height {
            self.viewport.top = cursor_line + 1 - height;
        }

        let cursor_chars = buffer
            .text()
            .split('\n')
            .nth(cursor_line)
            .map(|l| l.chars().collect::<Vec<_>>())
            .unwrap_or_default();
        if cursor_col < self.viewport.left {
            self.viewport.left = cursor_col;
        }
        while self.viewport.left < cursor_col
            && display_width(&cursor_chars[self.viewport.left..cursor_col]) >= width
        {
            self.viewport.left += 1;
        }

        let (sel_start, sel_end) = buffer.selection();
        let top = self.viewport.top;
        let left = self.viewport.left;
        let mut lines = Vec::with_capacity(height);
        let mut line_start = 0usize;
        for (i, text) in buffer.text().split('\n').enumerate() {
            let len = text.chars().count();
            if i >= top + height {
                break;
            }
            if i >= top {
                lines.push(editor_line(
                    text,
                    line_start,
                    left,
                    (sel_start, sel_end),
                    theme,
                ));
            }
            line_start += len + 1;
        }

        frame.render_widget(Paragraph::new(lines).style(theme.base()), inner);

        if focused {
            let visible = cursor_chars
                .get(left..cursor_col.min(cursor_chars.len()))
                .unwrap_or(&[]);
            let x = inner.x + (display_width(visible) as u16).min(inner.width.saturating_sub(1));
            let y = inner.y + (cursor_line - top) as u16;
            frame.set_cursor_position((x, y));
        }
    }

    fn render_preview(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let state = self.store.state();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Preview ")
            .border_style(theme.border(false))
            .style(theme.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let source = state.buffer.text();
        if self.preview.source != source {
            self.preview.source = source.to_string();
            self.preview.lines = preview::layout(source);
        }

        // Follow the cursor proportionally; preview lines do not map 1:1 onto source lines.
        let (cursor_line, _) = state.buffer.line_col(state.buffer.cursor());
        let total = self.preview.lines.len();
        let source_lines = state.buffer.line_count().max(1);
        let anchor = cursor_line * total / source_lines;
        let scroll = anchor
            .saturating_sub(inner.height as usize / 2)
            .min(total.saturating_sub(1));

        let paragraph = Paragraph::new(preview::to_lines(&self.preview.lines, theme))
            .style(theme.base())
            .wrap(Wrap { trim: false })
            .scroll((scroll.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, inner);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let state = self.store.state();
        frame.render_widget(Block::default().style(theme.status()), area);

        if let Some(prompt) = state.ui.prompt.as_ref() {
            let text = match &prompt.kind {
                PromptKind::ImportPath => format!(" Import file: {}", prompt.input),
                PromptKind::ConfirmDelete { name, .. } => format!(" Delete \"{name}\"? (y/n)"),
            };
            let width = text.chars().map(|c| c.width().unwrap_or(0)).sum::<usize>() as u16;
            frame.render_widget(Paragraph::new(text).style(theme.status()), area);
            frame.set_cursor_position((
                area.x + width.min(area.width.saturating_sub(1)),
                area.y,
            ));
            return;
        }

        let doc = state.active_document();
        let mut left = vec![
            Span::styled(format!(" {} ", doc.name), theme.status().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(
                    "│ {} chars │ {} lines │ {} ",
                    state.buffer.char_len(),
                    state.buffer.line_count(),
                    state.ui.view_mode.label()
                ),
                theme.status(),
            ),
        ];
        if state.assist.is_in_flight() {
            left.push(Span::styled("│ Assistant… ", theme.status()));
        }

        let right = match state.ui.notice.as_ref() {
            Some(notice) => Line::from(Span::styled(
                format!("{} ", notice.message),
                theme.notice(notice.level),
            )),
            None => assist_hints(state.buffer.has_selection(), theme),
        };
        let right_width = (right.width() as u16).min(area.width);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(right_width)])
            .split(area);
        frame.render_widget(Paragraph::new(Line::from(left)).style(theme.status()), cols[0]);
        frame.render_widget(Paragraph::new(right).style(theme.status()), cols[1]);
    }
}

fn editor_line(
    text: &str,
    line_start: usize,
    left: usize,
    (sel_start, sel_end): (usize, usize),
    theme: &UiTheme,
) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_selected = false;

    for (col, ch) in text.chars().enumerate().skip(left) {
        let pos = line_start + col;
        let selected = pos >= sel_start && pos < sel_end;
        if selected != run_selected && !run.is_empty() {
            spans.push(styled_run(std::mem::take(&mut run), run_selected, theme));
        }
        run_selected = selected;
        if ch == '\t' {
            run.push_str(TAB_DISPLAY);
        } else {
            run.push(ch);
        }
    }
    if !run.is_empty() {
        spans.push(styled_run(run, run_selected, theme));
    }

    // A selection that crosses the line break shows one highlighted cell.
    let newline = line_start + text.chars().count();
    if newline >= sel_start && newline < sel_end {
        spans.push(Span::styled(" ", theme.selection()));
    }

    Line::from(spans)
}

fn styled_run(text: String, selected: bool, theme: &UiTheme) -> Span<'static> {
    if selected {
        Span::styled(text, theme.selection())
    } else {
        Span::styled(text, theme.base())
    }
}

fn assist_hints(has_selection: bool, theme: &UiTheme) -> Line<'static> {
    let dim = theme.status().add_modifier(Modifier::DIM);
    let on = theme.status();
    let spans = AssistAction::ALL
        .into_iter()
        .map(|action| {
            let style = if action.requires_selection() && !has_selection {
                dim
            } else {
                on
            };
            Span::styled(
                format!(
                    "alt+{} {}  ",
                    assist_key(action),
                    action.label().to_lowercase()
                ),
                style,
            )
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

/// Default chord letter; the hint stays static even when settings rebind it.
fn assist_key(action: AssistAction) -> char {
    match action {
        AssistAction::Continue => 'c',
        AssistAction::Summarize => 's',
        AssistAction::FixGrammar => 'g',
        AssistAction::Explain => 'x',
        AssistAction::Translate => 'r',
    }
}

fn display_width(chars: &[char]) -> usize {
    chars
        .iter()
        .map(|&c| {
            if c == '\t' {
                TAB_DISPLAY.len()
            } else {
                c.width().unwrap_or(0)
            }
        })
        .sum()
}

pub(super) fn format_created(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|utc| {
            utc.with_timezone(&chrono::Local)
                .format(DATE_FORMAT)
                .to_string()
        })
        .unwrap_or_default()
}
