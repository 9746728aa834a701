//! Rendering.

use inkwell_core::Position;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, Prompt};
use crate::layout::{cell_width_at, gutter_width, visual_x_for_column};

const HELP: &str = " ^S Save | ^Q Quit | ^C/^X/^V Copy/Cut/Paste | ^K DelLine | ^Z Undo | ^W Select | ^A AI | ^F Format | ^G Goto | ^T/^B Top/Bottom | Ins Ins/Ovr | ^N Theme";

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_editor(frame, chunks[0]);
        self.render_status_line(frame, chunks[1]);
        self.render_bottom_line(frame, chunks[2]);
    }

    fn gutter(&self) -> usize {
        if self.config.editor.show_line_numbers {
            gutter_width(self.session.document().line_count())
        } else {
            0
        }
    }

    /// Keep the cursor inside a `height` x `width` text viewport.
    fn adjust_scroll(&mut self, height: usize, width: usize) {
        let doc = self.session.document();
        let cursor = doc.cursor();
        let tab = self.config.editor.tab_size;
        let cursor_x = visual_x_for_column(doc.current_line(), cursor.col, tab);

        if cursor.row < self.scroll_row {
            self.scroll_row = cursor.row;
        }
        if height > 0 && cursor.row >= self.scroll_row + height {
            self.scroll_row = cursor.row + 1 - height;
        }
        if cursor_x < self.scroll_col {
            self.scroll_col = cursor_x;
        }
        if width > 0 && cursor_x >= self.scroll_col + width {
            self.scroll_col = cursor_x + 1 - width;
        }
    }

    fn render_editor(&mut self, frame: &mut Frame, area: Rect) {
        let gutter = self.gutter();
        let height = area.height as usize;
        let text_width = (area.width as usize).saturating_sub(gutter);
        self.adjust_scroll(height, text_width);

        let theme = self.theme;
        let base = Style::default().bg(theme.background).fg(theme.foreground);
        let selected = Style::default().bg(theme.selection_bg).fg(theme.selection_fg);
        let gutter_style = Style::default().bg(theme.background).fg(theme.line_number_fg);

        let doc = self.session.document();
        let tab = self.config.editor.tab_size;
        let range = doc.selection_range().filter(|(start, end)| start != end);

        let mut lines = Vec::with_capacity(height);
        for row in self.scroll_row..(self.scroll_row + height).min(doc.line_count()) {
            let mut spans = Vec::new();
            if gutter > 0 {
                spans.push(Span::styled(
                    format!("{:>width$} ", row + 1, width = gutter - 1),
                    gutter_style,
                ));
            }

            let text = doc.line(row).unwrap_or_default();
            let kinds = self
                .highlighter
                .as_ref()
                .map(|highlighter| highlighter.highlight_line(text))
                .unwrap_or_default();
            let mut run = String::new();
            let mut run_style = base;
            let mut x = 0usize;
            for (col, ch) in text.chars().enumerate() {
                let w = cell_width_at(ch, x, tab);
                let start_x = x;
                x += w;
                if start_x < self.scroll_col {
                    continue;
                }
                if x > self.scroll_col + text_width {
                    break;
                }
                let is_selected = range.is_some_and(|(start, end)| {
                    let pos = Position::new(row, col);
                    start <= pos && pos < end
                });
                let style = if is_selected {
                    selected
                } else {
                    match kinds.get(col).copied().flatten() {
                        Some(kind) => base.fg(theme.token_fg(kind)),
                        None => base,
                    }
                };
                if style != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                if ch == '\t' {
                    run.extend(std::iter::repeat_n(' ', w));
                } else {
                    run.push(ch);
                }
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style));
            }
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines).style(base), area);

        if self.prompt.is_none() {
            let cursor = doc.cursor();
            let cursor_x = visual_x_for_column(doc.current_line(), cursor.col, tab);
            let x = area.x as usize + gutter + cursor_x.saturating_sub(self.scroll_col);
            let y = area.y as usize + cursor.row.saturating_sub(self.scroll_row);
            if x < (area.x + area.width) as usize && y < (area.y + area.height) as usize {
                frame.set_cursor_position((x as u16, y as u16));
            }
        }
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let session = self.session();
        let doc = session.document();
        let cursor = doc.cursor();
        let name = self
            .file_path()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string());

        let mut status = format!(
            " {}{} | Line {}/{}, Col {} | {}",
            if doc.is_modified() { "[+] " } else { "" },
            name,
            cursor.row + 1,
            doc.line_count(),
            cursor.col + 1,
            session.input_mode().label(),
        );
        if doc.selection().is_active() {
            status.push_str(" | SEL");
        }
        if !self.status().is_empty() {
            status.push_str(" | ");
            status.push_str(self.status());
        }

        let style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Paragraph::new(status).style(style), area);
    }

    fn render_bottom_line(&self, frame: &mut Frame, area: Rect) {
        let style = Style::default()
            .bg(self.theme.background)
            .fg(self.theme.foreground);

        let Some(prompt) = &self.prompt else {
            frame.render_widget(Paragraph::new(HELP).style(style), area);
            return;
        };

        let label = match prompt {
            Prompt::Generate { mode, .. } => format!(
                "AI [{}] [{}] (Tab=insert ^R=replace ^O=overwrite Up/Down=history): ",
                self.context_label(),
                mode.as_str().to_uppercase()
            ),
            Prompt::GoToLine { .. } => "Go to line: ".to_string(),
            Prompt::SaveAs { .. } => "Save as: ".to_string(),
        };
        let text = format!("{label}{}", prompt.input());
        let cursor_x = text.chars().map(crate::layout::char_width).sum::<usize>();
        frame.render_widget(Paragraph::new(text).style(style), area);

        let x = (area.x as usize + cursor_x).min((area.x + area.width).saturating_sub(1) as usize);
        frame.set_cursor_position((x as u16, area.y));
    }
}
