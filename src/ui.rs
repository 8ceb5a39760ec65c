use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as Path},
        Block, Borders, Clear, Paragraph, Wrap,
    },
    Frame,
};
use tui_textarea::TextArea;

use crate::game::{format_time, DebriefReason, Feedback, GameMachine, Screen};

const ROLES: [&str; 4] = ["Navigateur·rice", "Archiviste", "Linguiste", "Opérateur·rice"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeField {
    Name,
    RoomCode,
}

/// Front-end-only state: text being typed and the map cursor.
pub struct Inputs {
    pub name: TextArea<'static>,
    pub room_code: TextArea<'static>,
    pub answer: TextArea<'static>,
    pub final_key: TextArea<'static>,
    pub welcome_focus: WelcomeField,
    pub map_cursor: usize,
}

impl Inputs {
    pub fn new() -> Self {
        let mut inputs = Inputs {
            name: single_line(" Votre pseudo ", "Entrez votre pseudo"),
            room_code: single_line(" Code de la partie (optionnel) ", "ATLAS-"),
            answer: single_line(" Réponse ", ""),
            final_key: single_line(" Clé finale ", "Entrez la clé finale"),
            welcome_focus: WelcomeField::Name,
            map_cursor: 0,
        };
        inputs.focus_welcome(WelcomeField::Name);
        inputs
    }

    pub fn focus_welcome(&mut self, field: WelcomeField) {
        self.welcome_focus = field;
        set_focus(&mut self.name, field == WelcomeField::Name);
        set_focus(&mut self.room_code, field == WelcomeField::RoomCode);
    }

    pub fn reset_answer(&mut self, placeholder: &str) {
        self.answer = single_line(" Réponse ", placeholder);
    }

    pub fn reset_final_key(&mut self) {
        self.final_key = single_line(" Clé finale ", "Entrez la clé finale");
    }
}

pub fn single_line(title: &'static str, placeholder: &str) -> TextArea<'static> {
    let mut area = TextArea::default();
    area.set_block(Block::default().borders(Borders::ALL).title(title));
    area.set_cursor_line_style(Style::default());
    area.set_placeholder_text(placeholder.to_string());
    area
}

pub fn first_line(area: &TextArea<'_>) -> String {
    area.lines().first().cloned().unwrap_or_default()
}

fn set_focus(area: &mut TextArea<'_>, focused: bool) {
    if focused {
        area.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    } else {
        area.set_cursor_style(Style::default());
    }
}

pub fn draw_ui(f: &mut Frame, game: &GameMachine, inputs: &Inputs) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(10)])
        .split(f.area());

    draw_header(f, game, chunks[0]);

    match game.screen() {
        Screen::Welcome => draw_welcome(f, inputs, chunks[1]),
        Screen::Lobby => draw_lobby(f, game, chunks[1]),
        Screen::Map => draw_map(f, game, inputs, chunks[1]),
        Screen::Puzzle => draw_puzzle(f, game, inputs, chunks[1]),
        Screen::Meta => draw_meta(f, game, inputs, chunks[1]),
        Screen::Debrief => draw_debrief(f, game, chunks[1]),
    }
}

fn draw_header(f: &mut Frame, game: &GameMachine, area: Rect) {
    let session = game.session();
    let mut spans = vec![Span::styled(
        " OPÉRATION ATLAS ",
        Style::default().fg(Color::Black).bg(Color::Yellow),
    )];

    if session.screen.is_active() {
        let step = match session.screen {
            Screen::Map => Some(format!(
                "{}/{} continents",
                session.fragments.len(),
                game.rules().fragment_target
            )),
            _ => game.active_puzzle().map(|p| p.continent.clone()),
        };
        if let Some(step) = step {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!(" {step} "),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
        }
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" {} ", format_time(session.time_remaining)),
            Style::default().fg(time_color(session.time_remaining)).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn time_color(seconds: u32) -> Color {
    if seconds > 300 {
        Color::Green
    } else if seconds > 60 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn card(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_welcome(f: &mut Frame, inputs: &Inputs, area: Rect) {
    let area = card(area, 60, 16);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::styled("Bienvenue !", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Line::raw("Prêt à explorer les continents ?"),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    f.render_widget(&inputs.name, chunks[1]);
    f.render_widget(&inputs.room_code, chunks[2]);

    let players = Paragraph::new("2-4 joueurs • 20-25 min")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(players, chunks[3]);

    let help = Paragraph::new("Tab : changer de champ  •  Entrée : créer / rejoindre  •  Échap : quitter")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(help, chunks[4]);
}

fn draw_lobby(f: &mut Frame, game: &GameMachine, area: Rect) {
    let area = card(area, 72, 18);
    let session = game.session();

    let mut lines = vec![
        Line::styled(
            "Briefing de Mission",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Line::from(vec![
            Span::raw("Code de partie : "),
            Span::styled(session.room_code.clone(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]),
        Line::raw(""),
        Line::raw(format!(
            "Le Cartographe Fantôme a brouillé les cartes du monde ! Votre mission : explorer {} \
             continents, résoudre leurs énigmes et reconstituer la clé globale avant qu'il ne soit trop tard.",
            game.rules().fragment_target
        )),
        Line::raw(""),
    ];
    lines.extend(ROLES.iter().map(|role| Line::raw(format!("  ◆ {role}"))));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Entrée : commencer l'aventure",
        Style::default().fg(Color::Black).bg(Color::Yellow),
    ));

    let briefing = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", session.player_name)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(briefing, area);
}

fn draw_map(f: &mut Frame, game: &GameMachine, inputs: &Inputs, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(8), Constraint::Length(1)])
        .split(area);

    let title = Paragraph::new(vec![
        Line::styled("Choisissez votre destination", Style::default().add_modifier(Modifier::BOLD)),
        Line::styled(
            "Explorez les continents et résolvez leurs énigmes",
            Style::default().fg(Color::DarkGray),
        ),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let nodes = game.continents();
    let map_area = chunks[1];

    // Dashed route between consecutive continents
    let route = Canvas::default()
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, 100.0])
        .paint(|ctx| {
            for pair in nodes.windows(2) {
                ctx.draw(&Path {
                    x1: f64::from(pair[0].position.x),
                    y1: 100.0 - f64::from(pair[0].position.y),
                    x2: f64::from(pair[1].position.x),
                    y2: 100.0 - f64::from(pair[1].position.y),
                    color: Color::DarkGray,
                });
            }
        });
    f.render_widget(route, map_area);

    const NODE_W: u16 = 16;
    const NODE_H: u16 = 3;
    for (i, node) in nodes.iter().enumerate() {
        let cx = map_area.x + map_area.width.saturating_mul(node.position.x) / 100;
        let cy = map_area.y + map_area.height.saturating_mul(node.position.y) / 100;
        let x = cx
            .saturating_sub(NODE_W / 2)
            .clamp(map_area.x, (map_area.right()).saturating_sub(NODE_W).max(map_area.x));
        let y = cy
            .saturating_sub(NODE_H / 2)
            .clamp(map_area.y, (map_area.bottom()).saturating_sub(NODE_H).max(map_area.y));
        let rect = Rect { x, y, width: NODE_W.min(map_area.width), height: NODE_H.min(map_area.height) };

        let (badge, style) = if node.completed {
            ("✓", Style::default().fg(Color::Green))
        } else if node.locked {
            ("🔒", Style::default().fg(Color::DarkGray))
        } else if node.filler {
            ("…", Style::default().fg(Color::Gray))
        } else {
            ("○", Style::default().fg(Color::White))
        };
        let border = if i == inputs.map_cursor {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            style
        };

        let label = Paragraph::new(format!("{} {} {}", node.icon, node.name, badge))
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border));
        f.render_widget(Clear, rect);
        f.render_widget(label, rect);
    }

    let help = Paragraph::new("←/→ : choisir  •  Entrée : explorer  •  q : quitter")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}

fn draw_puzzle(f: &mut Frame, game: &GameMachine, inputs: &Inputs, area: Rect) {
    let (Some(puzzle), Some(attempt)) = (game.active_puzzle(), game.attempt()) else {
        return;
    };
    let area = card(area, 80, area.height);
    let clues = game.visible_clues();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(if attempt.clues_revealed { clues.len() as u16 + 2 } else { 0 }),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(if attempt.feedback.is_some() { 3 } else { 0 }),
            Constraint::Length(1),
            Constraint::Length(if puzzle.decoy.is_some() { 1 } else { 0 }),
        ])
        .split(area);

    let question = Paragraph::new(puzzle.question.as_str())
        .block(Block::default().borders(Borders::ALL).title(format!(" Énigme · {} ", puzzle.continent)))
        .wrap(Wrap { trim: false });
    f.render_widget(question, chunks[0]);

    if attempt.clues_revealed {
        let lines: Vec<Line> = clues.iter().map(|c| Line::raw(format!("• {c}"))).collect();
        let panel = Paragraph::new(lines)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().borders(Borders::ALL).title(" Indices "))
            .wrap(Wrap { trim: false });
        f.render_widget(panel, chunks[1]);
    }

    f.render_widget(
        Paragraph::new(puzzle.kind.label()).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
    f.render_widget(&inputs.answer, chunks[3]);

    if let Some(feedback) = attempt.feedback {
        let (text, style) = match feedback {
            Feedback::Correct => (
                "✔ Correct ! Fragment obtenu",
                Style::default().fg(Color::Black).bg(Color::Green),
            ),
            Feedback::Incorrect => (
                "✘ Incorrect, réessayez",
                Style::default().fg(Color::White).bg(Color::Red),
            ),
        };
        let banner = Paragraph::new(text)
            .style(style.add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(banner, chunks[4]);
    }

    let hint_style = if game.can_use_hint() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    };
    let actions = Line::from(vec![
        Span::styled(format!("F1 : indice (-{}s)", game.rules().hint_penalty_secs), hint_style),
        Span::raw("  •  Entrée : valider  •  Échap : retour"),
    ]);
    f.render_widget(Paragraph::new(actions).alignment(Alignment::Center), chunks[5]);

    if puzzle.decoy.is_some() {
        let warning = Paragraph::new("Attention : un élément peut être trompeur. Vérifiez vos indices !")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(warning, chunks[6]);
    }
}

fn draw_meta(f: &mut Frame, game: &GameMachine, inputs: &Inputs, area: Rect) {
    let area = card(area, 60, 14);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::styled("🏆 Méta-Énigme", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Line::raw("Combinez vos fragments pour former la clé finale"),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let tiles: Vec<Span> = game
        .session()
        .fragments
        .iter()
        .flat_map(|c| {
            [
                Span::styled(
                    format!(" {c} "),
                    Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
            ]
        })
        .collect();
    let fragments = Paragraph::new(vec![Line::raw(""), Line::from(tiles)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Fragments collectés "));
    f.render_widget(fragments, chunks[1]);

    f.render_widget(&inputs.final_key, chunks[2]);

    let help = Paragraph::new("Entrée : valider la clé")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}

fn draw_debrief(f: &mut Frame, game: &GameMachine, area: Rect) {
    let area = card(area, 72, 20);
    let session = game.session();

    let (headline, subtitle, color) = match session.debrief_reason {
        Some(DebriefReason::TimeExpired) => (
            "Temps écoulé !",
            "Le Cartographe Fantôme a pris de l'avance",
            Color::Red,
        ),
        _ => (
            "Mission accomplie !",
            "Vous avez déjoué le Cartographe Fantôme",
            Color::Green,
        ),
    };

    let mut lines = vec![
        Line::styled(headline, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Line::raw(subtitle),
        Line::raw(""),
        Line::raw(format!(
            "Temps restant : {}    Indices utilisés : {}",
            format_time(session.time_remaining),
            session.hints_used
        )),
    ];
    if let Some(key) = &session.final_key {
        lines.push(Line::raw(format!("Clé proposée : {key}")));
    }

    let learned = game.learned();
    if !learned.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Ce que vous avez appris :",
            Style::default().fg(Color::Yellow),
        ));
        for (name, fact) in learned {
            lines.push(Line::from(vec![
                Span::styled(format!("{name} : "), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(fact),
            ]));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Entrée : nouvelle partie  •  q : quitter",
        Style::default().fg(Color::DarkGray),
    ));

    let debrief = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(debrief, area);
}
