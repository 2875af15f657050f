use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::view::CardView;

pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub card: &'a CardView,
    /// Raw °C, only used to pick the temperature gradient
    pub temperature: Option<f64>,
}

/// Tallest FIGlet font in the stack.
const TEMP_CAP: u16 = 6;

/// location + gap + glyph + temp + description + gap + details
const CONTENT_FIXED: u16 = 6;

/// Borders (2) + vertical padding (2)
const CARD_CHROME: u16 = 4;

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let card_height = (CONTENT_FIXED + TEMP_CAP + CARD_CHROME).min(area.height);
        let [row] = Layout::vertical([Constraint::Length(card_height)])
            .flex(Flex::Center)
            .areas(area);
        let [card_area] = Layout::horizontal([Constraint::Percentage(90)])
            .flex(Flex::Center)
            .areas(row);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::new(2, 2, 1, 1));
        let inner = block.inner(card_area);
        frame.render_widget(block, card_area);

        let chunks = Layout::vertical([
            Constraint::Length(1),        // Location
            Constraint::Length(1),        // Spacer
            Constraint::Length(1),        // Glyph
            Constraint::Max(TEMP_CAP),    // Temperature
            Constraint::Length(1),        // Description
            Constraint::Length(1),        // Spacer
            Constraint::Length(1),        // Humidity / wind
        ])
        .flex(Flex::Center)
        .split(inner);

        let card = props.card;

        let location = Line::from(Span::styled(
            card.location.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(Paragraph::new(location), chunks[0]);

        if let Some(glyph) = card.glyph {
            frame.render_widget(Paragraph::new(Line::from(glyph).centered()), chunks[2]);
        }

        if chunks[3].height > 0 {
            let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
                .with_plain_fallback()
                .with_alignment(ArtAlignment::Center)
                .with_fill(temperature_gradient(props.temperature));
            frame.render_widget(ArtBox::new(&renderer, &card.temperature), chunks[3]);
        }

        let description = Line::from(Span::styled(
            card.description.clone(),
            Style::default().fg(Color::Gray),
        ))
        .centered();
        frame.render_widget(Paragraph::new(description), chunks[4]);

        let [humidity_area, wind_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                .flex(Flex::SpaceAround)
                .areas(chunks[6]);
        frame.render_widget(
            Paragraph::new(Line::from(card.humidity.clone()).centered()),
            humidity_area,
        );
        frame.render_widget(
            Paragraph::new(Line::from(card.wind.clone()).centered()),
            wind_area,
        );
    }
}

fn temperature_gradient(celsius: Option<f64>) -> Fill {
    let (start, end) = match celsius {
        Some(t) if t < 0.0 => (
            ArtColor::rgb(150, 200, 255), // Ice blue
            ArtColor::rgb(200, 230, 255),
        ),
        Some(t) if t < 15.0 => (
            ArtColor::rgb(100, 180, 255), // Cool blue
            ArtColor::rgb(150, 220, 200),
        ),
        Some(t) if t < 25.0 => (
            ArtColor::rgb(100, 200, 150), // Green
            ArtColor::rgb(255, 220, 100),
        ),
        Some(t) if t < 35.0 => (
            ArtColor::rgb(255, 180, 80), // Orange
            ArtColor::rgb(255, 120, 80),
        ),
        Some(_) => (
            ArtColor::rgb(255, 100, 80), // Hot
            ArtColor::rgb(255, 60, 60),
        ),
        None => (
            ArtColor::rgb(180, 180, 180), // No data
            ArtColor::rgb(220, 220, 220),
        ),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
