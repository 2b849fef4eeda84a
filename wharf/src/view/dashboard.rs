//! Dashboard view composing the usage chart, agents, and README sections.

use std::collections::HashMap;

use iced::widget::{Column, button, column, container, row, rule, scrollable, text};
use iced::{Alignment, Element, Length, Theme};

use wharf_api::{UsageInterval, Workspace};

use crate::app::AppTheme;
use crate::message::{AgentId, Message};
use crate::view::icons::{self, IconSize};
use crate::view::markdown::{self, MarkdownStyle, ParsedMarkdown};
use crate::view::port_forward::{PortForwardState, agent_row};
use crate::view::theme::ThemeColors;
use crate::view::usage_chart::{ChartPalette, UsageChartState, usage_chart_view};

/// Top-level dashboard state.
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Last workspace snapshot, if any.
    pub workspace: Option<Workspace>,
    /// Whether the last deployment fetch succeeded.
    pub connected: bool,
    /// Last error message, if any.
    pub last_error: Option<String>,
}

/// Template README state.
#[derive(Debug, Default)]
pub struct ReadmeState {
    /// Parsed README, once received.
    pub document: Option<ParsedMarkdown>,
    /// Fetch error, if the README could not be loaded.
    pub error: Option<String>,
}

/// Render the dashboard view.
pub fn dashboard_view<'a>(
    state: &'a DashboardState,
    usage: &'a UsageChartState,
    ports: &'a HashMap<AgentId, PortForwardState>,
    readme: &'a ReadmeState,
    banner: &'a [markdown::Inline],
    renderer: &'a markdown::Renderer,
    app_theme: AppTheme,
    now_ms: i64,
) -> Element<'a, Message> {
    let theme = app_theme.to_theme();
    let colors = ThemeColors::new(&theme);

    let mut header = Column::new()
        .push(render_header(state, app_theme, &colors))
        .spacing(8);

    if !banner.is_empty() {
        header = header.push(render_banner(banner, renderer, &colors));
    }

    let usage_section = render_usage_section(usage, &colors);
    let agents_section = render_agents_section(state, ports, &colors, now_ms);
    let readme_section = render_readme_section(readme, renderer, &colors);

    let body = column![usage_section, agents_section, readme_section].spacing(16);

    let content = column![header, rule::horizontal(1), scrollable(body).height(Length::Fill)]
        .spacing(10)
        .padding(20);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Render the deployment banner (restricted inline Markdown).
fn render_banner<'a>(
    banner: &'a [markdown::Inline],
    renderer: &'a markdown::Renderer,
    colors: &ThemeColors<'_>,
) -> Element<'a, Message> {
    let background = colors.row_background_alt();
    let border = colors.border_subtle();

    container(renderer.view_inline(
        banner,
        MarkdownStyle::from_theme(colors),
        Message::LinkClicked,
    ))
    .padding(8)
    .width(Length::Fill)
    .style(move |_theme: &Theme| container::Style {
        background: Some(iced::Background::Color(background)),
        border: iced::Border {
            color: border,
            width: 1.0,
            radius: 4.0.into(),
        },
        ..Default::default()
    })
    .into()
}

/// Render the header with connection status and theme toggle.
fn render_header<'a>(
    state: &'a DashboardState,
    app_theme: AppTheme,
    colors: &ThemeColors<'_>,
) -> Element<'a, Message> {
    let title = text("Wharf Dashboard").size(24);

    let workspace_label = match &state.workspace {
        Some(workspace) => text(format!("{}/{}", workspace.owner, workspace.name)).size(14),
        None => text("").size(14),
    };

    let status_icon = if state.connected {
        icons::connected(IconSize::Medium)
    } else {
        icons::disconnected(IconSize::Medium)
    };

    let status_text = if state.connected {
        text("Connected")
            .size(14)
            .style(|_theme: &Theme| text::Style {
                color: Some(iced::Color::from_rgb(0.2, 0.8, 0.2)),
            })
    } else {
        text("Disconnected")
            .size(14)
            .style(|_theme: &Theme| text::Style {
                color: Some(iced::Color::from_rgb(0.8, 0.2, 0.2)),
            })
    };

    let status = row![status_icon, status_text]
        .spacing(5)
        .align_y(Alignment::Center);

    let theme_icon = match app_theme {
        AppTheme::Dark => icons::sun(IconSize::Medium),
        AppTheme::Light => icons::moon(IconSize::Medium),
    };
    let theme_button = button(theme_icon)
        .on_press(Message::ToggleTheme)
        .style(iced::widget::button::secondary);

    let header_row = row![
        title,
        workspace_label,
        status,
        iced::widget::space::horizontal(),
        theme_button,
    ]
    .spacing(20)
    .align_y(Alignment::Center);

    let mut header_col = Column::new().push(header_row);

    if let Some(ref error) = state.last_error {
        let danger = colors.danger();
        let error_text = text(format!("Error: {}", error))
            .size(12)
            .style(move |_theme: &Theme| text::Style {
                color: Some(danger),
            });
        header_col = header_col.push(error_text);
    }

    header_col.spacing(5).into()
}

/// Render the active-user chart card.
fn render_usage_section<'a>(
    usage: &'a UsageChartState,
    colors: &ThemeColors<'_>,
) -> Element<'a, Message> {
    let title = text("Active Users").size(18);

    let mut interval_row = row![title].spacing(10).align_y(Alignment::Center);
    for &interval in UsageInterval::all() {
        let is_active = usage.interval() == interval;

        let btn = button(text(interval_label(interval)).size(12))
            .on_press(Message::SelectInterval(interval));
        let btn = if is_active {
            btn.style(iced::widget::button::primary)
        } else {
            btn.style(iced::widget::button::secondary)
        };

        interval_row = interval_row.push(btn);
    }

    let muted = colors.text_muted();
    let caption = text(
        "When a connection is initiated to a user's workspace they are \
         considered an active user. e.g. apps, web terminal, SSH",
    )
    .size(12)
    .style(move |_theme: &Theme| text::Style { color: Some(muted) });

    let body: Element<'a, Message> = if usage.is_loaded() {
        usage_chart_view(usage, ChartPalette::from_theme(colors))
    } else {
        text("Loading usage data...").size(14).into()
    };

    card(column![interval_row, caption, body].spacing(8).into(), colors)
}

/// Render the agents card with per-agent port controls.
fn render_agents_section<'a>(
    state: &'a DashboardState,
    ports: &'a HashMap<AgentId, PortForwardState>,
    colors: &ThemeColors<'_>,
    now_ms: i64,
) -> Element<'a, Message> {
    let title = text("Agents").size(18);

    let body: Element<'a, Message> = match &state.workspace {
        Some(workspace) if !workspace.agents.is_empty() => {
            let mut list = Column::new().spacing(8);

            // Render in the order the deployment reports the agents
            for agent in &workspace.agents {
                if let Some(port_state) = ports.get(&AgentId::from(agent)) {
                    list = list.push(agent_row(port_state, colors, now_ms));
                }
            }

            list.into()
        }
        Some(_) => text("This workspace has no agents.").size(14).into(),
        None => text("Waiting for deployment data...").size(14).into(),
    };

    card(column![title, body].spacing(10).into(), colors)
}

/// Render the template README card.
fn render_readme_section<'a>(
    readme: &'a ReadmeState,
    renderer: &'a markdown::Renderer,
    colors: &ThemeColors<'_>,
) -> Element<'a, Message> {
    let title = text("Template README").size(18);

    let body: Element<'a, Message> = if let Some(document) = &readme.document {
        renderer.view(
            document,
            MarkdownStyle::from_theme(colors),
            Message::LinkClicked,
        )
    } else if let Some(error) = &readme.error {
        let warning = colors.warning();
        text(format!("README unavailable: {}", error))
            .size(13)
            .style(move |_theme: &Theme| text::Style {
                color: Some(warning),
            })
            .into()
    } else {
        text("Loading README...").size(14).into()
    };

    card(column![title, body].spacing(10).into(), colors)
}

/// Wrap a section in a card container.
fn card<'a>(content: Element<'a, Message>, colors: &ThemeColors<'_>) -> Element<'a, Message> {
    let background = colors.card_background();
    let border = colors.border_subtle();

    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(background)),
            border: iced::Border {
                color: border,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn interval_label(interval: UsageInterval) -> &'static str {
    match interval {
        UsageInterval::Day => "Day",
        UsageInterval::Week => "Week",
    }
}
