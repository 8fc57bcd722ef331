//! Terminal platform built on crossterm
//!
//! The logical 500x700 screen is scaled onto whatever grid the terminal has.
//! Images become solid fills or single glyphs, text is printed into the cells
//! it lands on, and the whole grid is flushed once per frame.
//!
//! Held keys: classic terminals only report presses (OS key-repeat shows up as
//! repeated presses), so a key counts as held while its last press is at most
//! `HOLD_WINDOW` frames old. Terminals with keyboard enhancement also send
//! releases, which drop the key immediately.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Print};
use crossterm::{QueueableCommand, cursor, terminal};
use glam::{IVec2, Vec2};

use super::{Anchor, Canvas, Color, FrameInput, InputEvent, Key, TextStyle};
use crate::consts::*;
use crate::sim::{ImageId, Rect};

/// Frames a key stays held after its last press or repeat (~550 ms at 90 FPS).
/// Has to outlast the OS delay before auto-repeat starts (250-500 ms), or a
/// held key stutters after the first press.
const HOLD_WINDOW: u64 = 50;

/// How an image is approximated on the grid
#[derive(Debug, Clone, Copy, PartialEq)]
enum Look {
    /// Solid background over the whole image
    Fill(Color),
    /// Glyph repeated over the whole image
    Sprite(char, Color),
    /// Glyph on every n-th cell, background left alone
    Scatter(char, Color, usize),
}

fn look(image: ImageId) -> Look {
    match image {
        ImageId::AstroLeft | ImageId::AstroRight => Look::Sprite('A', Color::WHITE),
        ImageId::Asteroid => Look::Sprite('@', Color::rgb(150, 120, 90)),
        ImageId::Bird1 | ImageId::Bird2 | ImageId::Bird3 => Look::Sprite('v', Color::BLACK),
        ImageId::Balloon => Look::Sprite('O', Color::rgb(230, 60, 60)),
        ImageId::Space => Look::Fill(Color::rgb(10, 10, 40)),
        ImageId::Sky => Look::Fill(Color::rgb(110, 170, 235)),
        ImageId::City => Look::Fill(Color::rgb(60, 60, 85)),
        ImageId::Sun => Look::Sprite('*', Color::YELLOW),
        ImageId::Clouds => Look::Scatter('~', Color::WHITE, 11),
        ImageId::Heart => Look::Sprite('♥', Color::rgb(230, 40, 60)),
        ImageId::MenuBackground => Look::Fill(Color::rgb(25, 30, 60)),
        ImageId::Level1Banner => Look::Fill(Color::rgb(20, 10, 50)),
        ImageId::Level2Banner => Look::Fill(Color::rgb(40, 110, 190)),
        ImageId::Level3Banner => Look::Fill(Color::rgb(90, 60, 70)),
    }
}

/// Logical size of an image in pixels
fn image_size(image: ImageId) -> IVec2 {
    if image.is_backdrop() {
        return IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    }
    match image {
        ImageId::AstroLeft | ImageId::AstroRight => IVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        ImageId::Sun => IVec2::new(100, 100),
        ImageId::Heart => IVec2::new(30, 30),
        _ => IVec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
    }
}

fn to_term(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::WHITE,
            bg: Color::BLACK,
        }
    }
}

/// Character grid standing in for the logical screen
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    /// Grid cell containing a logical point (may lie outside the grid)
    pub fn to_cell(&self, pos: IVec2) -> IVec2 {
        IVec2::new(
            (pos.x as i64 * self.cols as i64).div_euclid(SCREEN_WIDTH as i64) as i32,
            (pos.y as i64 * self.rows as i64).div_euclid(SCREEN_HEIGHT as i64) as i32,
        )
    }

    /// Logical point at the middle of a grid cell
    pub fn to_logical(&self, column: u16, row: u16) -> Vec2 {
        Vec2::new(
            (column as f32 + 0.5) * SCREEN_WIDTH as f32 / self.cols as f32,
            (row as f32 + 0.5) * SCREEN_HEIGHT as f32 / self.rows as f32,
        )
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        self.cells.get_mut(row as usize * self.cols as usize + col as usize)
    }

    /// Cells covered by a logical rectangle; never empty for a non-empty rect
    fn cell_span(&self, rect: Rect) -> (IVec2, IVec2) {
        let min = self.to_cell(rect.pos());
        let max = self.to_cell(IVec2::new(rect.right(), rect.bottom()));
        (min, max.max(min + IVec2::ONE))
    }

    fn paint(&mut self, rect: Rect, mut f: impl FnMut(&mut Cell, usize)) {
        let (min, max) = self.cell_span(rect);
        let mut n = 0;
        for row in min.y..max.y {
            for col in min.x..max.x {
                if let Some(cell) = self.cell_mut(col, row) {
                    f(cell, n);
                }
                n += 1;
            }
        }
    }

    /// Characters of one grid row, for tests and debugging
    pub fn row_text(&self, row: u16) -> String {
        let start = row as usize * self.cols as usize;
        self.cells[start..start + self.cols as usize]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    /// Write the grid to `out` and reset it for the next frame
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let mut current: Option<(Color, Color)> = None;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if current != Some((cell.fg, cell.bg)) {
                    out.queue(style::SetForegroundColor(to_term(cell.fg)))?;
                    out.queue(style::SetBackgroundColor(to_term(cell.bg)))?;
                    current = Some((cell.fg, cell.bg));
                }
                out.queue(Print(cell.ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()?;
        self.cells.fill(Cell::default());
        Ok(())
    }
}

impl Canvas for TerminalCanvas {
    fn size(&self) -> IVec2 {
        IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    fn draw_image(&mut self, image: ImageId, pos: IVec2) {
        let size = image_size(image);
        let rect = Rect::new(pos.x, pos.y, size.x, size.y);
        match look(image) {
            Look::Fill(color) => self.paint(rect, |cell, _| {
                *cell = Cell {
                    ch: ' ',
                    fg: Color::WHITE,
                    bg: color,
                }
            }),
            Look::Sprite(ch, color) => self.paint(rect, |cell, _| {
                cell.ch = ch;
                cell.fg = color;
            }),
            Look::Scatter(ch, color, every) => self.paint(rect, |cell, n| {
                if n % every == 0 {
                    cell.ch = ch;
                    cell.fg = color;
                }
            }),
        }
    }

    fn draw_text(&mut self, text: &str, pos: IVec2, style: TextStyle) {
        let at = self.to_cell(pos);
        let len = text.chars().count() as i32;
        let start = match style.anchor {
            Anchor::TopLeft => at.x,
            Anchor::Center => at.x - len / 2,
            Anchor::TopRight => at.x - len,
        };
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(start + i as i32, at.y) {
                cell.ch = ch;
                cell.fg = style.color;
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.paint(rect, |cell, _| {
            *cell = Cell {
                ch: ' ',
                fg: Color::BLACK,
                bg: color,
            }
        });
    }
}

/// What a key press means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mapped {
    Key(Key),
    Quit,
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Mapped> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Mapped::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Mapped::Quit),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Mapped::Key(Key::Left)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Mapped::Key(Key::Right)),
        KeyCode::Esc => Some(Mapped::Key(Key::Escape)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Mapped::Key(Key::P)),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Mapped::Key(Key::M)),
        _ => None,
    }
}

/// Tracks when each direction key was last seen
#[derive(Debug, Default)]
struct HeldKeys {
    last_seen: HashMap<Key, u64>,
}

impl HeldKeys {
    fn press(&mut self, key: Key, frame: u64) {
        self.last_seen.insert(key, frame);
    }

    fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    fn is_held(&self, key: Key, frame: u64) -> bool {
        self.last_seen
            .get(&key)
            .is_some_and(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
    }
}

/// Raw-mode terminal session: owns the output, the grid and input state.
/// The terminal is restored by `leave` or, failing that, on drop.
pub struct Terminal<W: Write> {
    out: W,
    canvas: TerminalCanvas,
    held: HeldKeys,
    frame: u64,
    started: Instant,
    enhanced_keys: bool,
    active: bool,
}

impl<W: Write> Terminal<W> {
    /// Switch to raw mode, the alternate screen and mouse capture
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on, dropping the session restores the terminal
        let mut session = Self {
            out,
            canvas: TerminalCanvas::new(1, 1),
            held: HeldKeys::default(),
            frame: 0,
            started: Instant::now(),
            enhanced_keys: false,
            active: true,
        };
        session.setup()?;
        Ok(session)
    }

    fn setup(&mut self) -> io::Result<()> {
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(EnableMouseCapture)?;
        self.out.queue(cursor::Hide)?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            self.out.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            self.enhanced_keys = true;
        }
        self.out.flush()?;

        let (cols, rows) = terminal::size()?;
        self.canvas.resize(cols, rows);
        log::info!(
            "Terminal {}x{} (keyboard enhancement: {})",
            cols,
            rows,
            self.enhanced_keys
        );
        Ok(())
    }

    /// Restore the terminal to its normal state. Raw mode is switched off
    /// even when writing the escape sequences fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let written = self.write_restore();
        let raw = terminal::disable_raw_mode();
        written.and(raw)
    }

    fn write_restore(&mut self) -> io::Result<()> {
        if self.enhanced_keys {
            self.out.queue(PopKeyboardEnhancementFlags)?;
        }
        self.out.queue(cursor::Show)?;
        self.out.queue(DisableMouseCapture)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.out.flush()
    }

    pub fn canvas(&mut self) -> &mut TerminalCanvas {
        &mut self.canvas
    }

    pub fn present(&mut self) -> io::Result<()> {
        self.canvas.present(&mut self.out)
    }

    /// Drain pending terminal events into one frame's input
    pub fn poll(&mut self) -> io::Result<FrameInput> {
        self.frame += 1;
        let mut input = FrameInput {
            now_ms: self.started.elapsed().as_millis() as u64,
            ..Default::default()
        };

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                }) => self.on_key(code, modifiers, kind, &mut input.events),
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => input
                    .events
                    .push(InputEvent::MouseDown(self.canvas.to_logical(column, row))),
                Event::Resize(cols, rows) => {
                    log::debug!("Terminal resized to {}x{}", cols, rows);
                    self.canvas.resize(cols, rows);
                }
                _ => {}
            }
        }

        input.left_held = self.held.is_held(Key::Left, self.frame);
        input.right_held = self.held.is_held(Key::Right, self.frame);
        Ok(input)
    }

    fn on_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        kind: KeyEventKind,
        events: &mut Vec<InputEvent>,
    ) {
        let Some(mapped) = map_key(code, modifiers) else {
            return;
        };
        match (mapped, kind) {
            (Mapped::Quit, KeyEventKind::Press) => events.push(InputEvent::Quit),
            (Mapped::Key(key), KeyEventKind::Press) => {
                self.held.press(key, self.frame);
                events.push(InputEvent::KeyDown(key));
            }
            (Mapped::Key(key), KeyEventKind::Repeat) => self.held.press(key, self.frame),
            (Mapped::Key(key), KeyEventKind::Release) => self.held.release(key),
            _ => {}
        }
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            log::warn!("Failed to restore terminal: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_mapping_scales_logical_screen() {
        let canvas = TerminalCanvas::new(100, 70);
        assert_eq!(canvas.to_cell(IVec2::new(0, 0)), IVec2::new(0, 0));
        assert_eq!(canvas.to_cell(IVec2::new(250, 350)), IVec2::new(50, 35));
        assert_eq!(canvas.to_cell(IVec2::new(-5, -20)), IVec2::new(-1, -2));

        let p = canvas.to_logical(50, 35);
        assert_eq!(p, Vec2::new(252.5, 355.0));
    }

    #[test]
    fn test_click_lands_on_button_under_cursor() {
        let canvas = TerminalCanvas::new(100, 70);
        // Play button spans (150..350, 220..270) -> columns 30..70, rows 22..27
        let p = canvas.to_logical(31, 23);
        let buttons = crate::ui::buttons(crate::ui::Menu::Main);
        assert_eq!(crate::ui::hit(&buttons, p), Some(crate::ui::Action::Play));
    }

    #[test]
    fn test_text_anchors() {
        let mut canvas = TerminalCanvas::new(50, 10);
        let style = |anchor| TextStyle::new(36, Color::WHITE, anchor);
        canvas.draw_text("abc", IVec2::new(0, 0), style(Anchor::TopLeft));
        canvas.draw_text("xyz", IVec2::new(500, 70), style(Anchor::TopRight));
        canvas.draw_text("mid", IVec2::new(250, 140), style(Anchor::Center));
        assert!(canvas.row_text(0).starts_with("abc"));
        assert!(canvas.row_text(1).ends_with("xyz"));
        assert_eq!(&canvas.row_text(2)[24..27], "mid");
    }

    #[test]
    fn test_offscreen_drawing_is_clipped() {
        let mut canvas = TerminalCanvas::new(20, 20);
        canvas.draw_image(ImageId::Asteroid, IVec2::new(-10, 680));
        let style = TextStyle::new(10, Color::WHITE, Anchor::TopLeft);
        canvas.draw_text("far away", IVec2::new(900, 900), style);
        assert!(canvas.row_text(19).starts_with('@'));
    }

    #[test]
    fn test_small_sprite_covers_at_least_one_cell() {
        let mut canvas = TerminalCanvas::new(10, 10);
        canvas.draw_image(ImageId::Heart, IVec2::new(10, 10));
        assert_eq!(canvas.row_text(0).chars().next(), Some('♥'));
    }

    #[test]
    fn test_present_writes_and_clears() {
        let mut canvas = TerminalCanvas::new(5, 2);
        canvas.draw_text("hi", IVec2::ZERO, TextStyle::new(10, Color::WHITE, Anchor::TopLeft));
        let mut out = Vec::new();
        canvas.present(&mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("hi"));
        assert_eq!(canvas.row_text(0), "     ");
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::Char('q'), KeyModifiers::NONE), Some(Mapped::Quit));
        assert_eq!(
            map_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Mapped::Quit)
        );
        assert_eq!(map_key(KeyCode::Char('c'), KeyModifiers::NONE), None);
        assert_eq!(map_key(KeyCode::Esc, KeyModifiers::NONE), Some(Mapped::Key(Key::Escape)));
        assert_eq!(map_key(KeyCode::Left, KeyModifiers::NONE), Some(Mapped::Key(Key::Left)));
    }

    /// Writer whose every write fails, like a closed terminal
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn broken_session() -> Terminal<BrokenPipe> {
        Terminal {
            out: BrokenPipe,
            canvas: TerminalCanvas::new(1, 1),
            held: HeldKeys::default(),
            frame: 0,
            started: Instant::now(),
            enhanced_keys: false,
            active: true,
        }
    }

    #[test]
    fn test_failed_setup_still_owes_a_restore() {
        let mut session = broken_session();
        assert!(session.setup().is_err());
        assert!(session.active);

        // Restore reports the write failure but only runs once
        assert!(session.leave().is_err());
        assert!(!session.active);
        assert!(session.leave().is_ok());
    }

    #[test]
    fn test_held_keys_bridge_the_repeat_delay() {
        // A 500 ms gap between the first press and the first repeat
        let delay = 500 * FPS as u64 / 1000;
        let mut held = HeldKeys::default();
        held.press(Key::Right, 0);
        for frame in 0..=delay {
            assert!(held.is_held(Key::Right, frame));
        }
        held.press(Key::Right, delay);
        assert!(held.is_held(Key::Right, delay + 5));
    }

    #[test]
    fn test_held_keys_expire_after_window() {
        let mut held = HeldKeys::default();
        held.press(Key::Left, 10);
        assert!(held.is_held(Key::Left, 10 + HOLD_WINDOW));
        assert!(!held.is_held(Key::Left, 11 + HOLD_WINDOW));
        assert!(!held.is_held(Key::Right, 10));

        held.press(Key::Right, 20);
        held.release(Key::Right);
        assert!(!held.is_held(Key::Right, 20));
    }
}
