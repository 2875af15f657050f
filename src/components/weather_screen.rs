use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, WeatherCard, WeatherCardProps};
use crate::action::Action;
use crate::state::{AppState, ViewState};
use crate::view::CardView;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Props for WeatherScreen - read-only view of state
pub struct WeatherScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The single full-screen view
#[derive(Default)]
pub struct WeatherScreen;

impl Component<Action> for WeatherScreen {
    type Props<'a> = WeatherScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherScreenProps<'_>) {
        let (place, weather) = match &props.state.view {
            ViewState::Loading => return render_spinner(frame, area, props.state.tick_count),
            ViewState::Error(message) => return render_error(frame, area, message),
            ViewState::Ready { place, weather } => (place, weather),
        };

        let chunks = Layout::vertical([
            Constraint::Min(1),    // Card
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let card = CardView::from_ready(place.as_ref(), weather.as_ref());
        let mut widget = WeatherCard;
        widget.render(
            frame,
            chunks[0],
            WeatherCardProps {
                card: &card,
                temperature: weather.as_ref().and_then(|w| w.temperature),
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[StatusBarHint::new("q", "quit")]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn centered_row(area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    row
}

fn render_spinner(frame: &mut Frame, area: Rect, tick_count: u32) {
    let spinner = SPINNER_FRAMES[tick_count as usize % SPINNER_FRAMES.len()];
    let line = Line::from(Span::styled(
        spinner,
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    ))
    .centered();
    frame.render_widget(Paragraph::new(line), centered_row(area));
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let line = Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Red),
    ))
    .centered();
    frame.render_widget(Paragraph::new(line), centered_row(area));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_handle_event_quit() {
        let mut component = WeatherScreen;
        let state = AppState::default();
        let props = WeatherScreenProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("q")), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_handle_event_has_no_refresh() {
        let mut component = WeatherScreen;
        let state = AppState::default();
        let props = WeatherScreenProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("r")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = WeatherScreen;
        let state = AppState::default();
        let props = WeatherScreenProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("q")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_spinner_advances_with_ticks() {
        let mut render = RenderHarness::new(40, 10);
        let mut component = WeatherScreen;

        let first = AppState::default();
        let second = AppState {
            tick_count: 1,
            ..Default::default()
        };

        let a = render.render_to_string_plain(|frame| {
            let props = WeatherScreenProps {
                state: &first,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });
        let b = render.render_to_string_plain(|frame| {
            let props = WeatherScreenProps {
                state: &second,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(a.contains(SPINNER_FRAMES[0]));
        assert!(b.contains(SPINNER_FRAMES[1]));
    }
}
