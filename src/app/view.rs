use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    button, center, column, container, mouse_area, row, scrollable, stack, text, text_input,
    vertical_space,
};
use iced::{Background, Border, Element, Length};

use crate::pages::SlotState;
use crate::siblings::Sibling;
use crate::theme;

use super::messages::Message;
use super::state::{App, PAGE_SCROLL_ID, ReaderState, SessionPhase};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        match (&self.session.phase, &self.reader) {
            (SessionPhase::Open, Some(reader)) => self.reader_view(reader),
            _ => self.open_view(),
        }
    }

    fn open_view(&self) -> Element<'_, Message> {
        let mut content = column![
            text("Comic Viewer").size(28),
            row![
                text_input("library/series/issue.cbz", &self.open_path_input)
                    .on_input(Message::OpenPathInputChanged)
                    .on_submit(Message::OpenPathRequested),
                button("Open").on_press(Message::OpenPathRequested),
            ]
            .spacing(8),
        ]
        .spacing(12)
        .max_width(640);

        if self.session.phase == SessionPhase::Opening {
            content = content.push(text("Opening..."));
        }
        if let Some(error) = &self.session.open_error {
            content = content.push(text(format!("Could not open comic: {error}")));
        }
        if !self.recent.is_empty() {
            content = content.push(text("Recent").size(20));
            for comic in &self.recent {
                content = content.push(
                    button(text(comic.path.as_str()))
                        .on_press(Message::OpenRecentComic(comic.path.clone()))
                        .width(Length::Fill),
                );
            }
        }

        center(content).padding(24).into()
    }

    fn reader_view(&self, reader: &ReaderState) -> Element<'_, Message> {
        let mut layers: Vec<Element<'_, Message>> = vec![self.page_surface(reader)];
        if reader.chrome_visible {
            layers.push(self.chrome(reader));
        }
        if let Some(page_number) = self.session.resume_prompt {
            layers.push(self.resume_overlay(page_number, reader.page_count()));
        }
        if self.session.next_issue_shown {
            if let Some(next) = self.session.next_sibling() {
                layers.push(next_issue_overlay(next));
            }
        }
        stack(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn page_surface(&self, reader: &ReaderState) -> Element<'_, Message> {
        let background = reader
            .pages
            .edge_color(reader.current_page)
            .map(theme::background_from_edge)
            .unwrap_or_else(|| theme::neutral_background(self.config.theme.into()));

        let content: Element<'_, Message> = if reader.pages.is_empty() {
            center(text("This comic has no pages.")).into()
        } else {
            match reader.pages.state(reader.current_page) {
                SlotState::Loaded => match reader.pages.handle(reader.current_page) {
                    Some(handle) => {
                        if reader.zoom.is_zoomed() {
                            let zoomed_width = self.config.window_width * reader.zoom.scale();
                            scrollable(
                                iced::widget::image(handle)
                                    .width(Length::Fixed(zoomed_width)),
                            )
                            .direction(scrollable::Direction::Both {
                                vertical: scrollable::Scrollbar::new(),
                                horizontal: scrollable::Scrollbar::new(),
                            })
                            .id(PAGE_SCROLL_ID.clone())
                            .width(Length::Fill)
                            .height(Length::Fill)
                            .into()
                        } else {
                            center(
                                iced::widget::image(handle)
                                    .width(Length::Fill)
                                    .height(Length::Fill),
                            )
                            .into()
                        }
                    }
                    None => center(text("Page image unavailable")).into(),
                },
                SlotState::Loading | SlotState::Unloaded => center(text(format!(
                    "Loading page {}...",
                    reader.current_page + 1
                )))
                .into(),
                SlotState::Error => center(
                    column![
                        text(format!(
                            "Page {} failed to load.",
                            reader.current_page + 1
                        )),
                        button("Retry").on_press(Message::RetryPage(reader.current_page)),
                    ]
                    .spacing(8)
                    .align_x(Horizontal::Center),
                )
                .into(),
            }
        };

        let surface = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(background)),
                ..container::Style::default()
            });

        mouse_area(surface)
            .on_press(Message::PageSurfaceTapped)
            .into()
    }

    fn chrome(&self, reader: &ReaderState) -> Element<'_, Message> {
        let page_count = reader.page_count().max(1);
        let title = self
            .session
            .comic_path
            .as_deref()
            .and_then(|path| path.rsplit('/').next())
            .unwrap_or("");
        let bookmark_label = if self.session.bookmark_saved {
            "Bookmarked"
        } else {
            "Bookmark"
        };

        let header = container(
            row![
                button("Close").on_press(Message::CloseComic),
                text(title).width(Length::Fill),
                text(format!(
                    "Page {} of {}",
                    reader.current_page + 1,
                    page_count
                )),
                button(bookmark_label).on_press(Message::SaveReadingPosition),
                button("-").on_press(Message::ZoomOut),
                button("+").on_press(Message::ZoomIn),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
        )
        .width(Length::Fill)
        .padding(8)
        .style(bar_style);

        let page_slider = iced::widget::slider(
            0..=(page_count as u32 - 1),
            reader.current_page as u32,
            |value| Message::NavigateToPage(value as usize),
        );

        let mut footer_row = row![
            button("Prev").on_press(Message::PreviousPage),
            button("Next").on_press(Message::NextPage),
            page_slider,
        ]
        .spacing(8)
        .align_y(Vertical::Center);

        if let Some(status) = &self.session.status {
            footer_row = footer_row.push(text(status.as_str()));
        }

        let footer = container(footer_row)
            .width(Length::Fill)
            .padding(8)
            .style(bar_style);

        column![header, vertical_space(), footer].into()
    }

    fn resume_overlay(&self, page_number: u32, page_count: usize) -> Element<'_, Message> {
        let card = container(
            column![
                text(format!(
                    "Continue from page {page_number} of {page_count}?"
                )),
                row![
                    button("Resume").on_press(Message::ResumeAccepted),
                    button("Start over").on_press(Message::ResumeDeclined),
                ]
                .spacing(8),
            ]
            .spacing(12)
            .align_x(Horizontal::Center),
        )
        .padding(16)
        .style(card_style);

        center(card).into()
    }
}

fn next_issue_overlay(next: &Sibling) -> Element<'_, Message> {
    let card = container(
        column![
            text(format!("Up next: {}", next.display_name)),
            row![
                button("Read next issue").on_press(Message::NextIssueAccepted),
                button("Dismiss").on_press(Message::NextIssueDismissed),
            ]
            .spacing(8),
        ]
        .spacing(12)
        .align_x(Horizontal::Center),
    )
    .padding(16)
    .style(card_style);

    container(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .align_y(Vertical::Bottom)
        .padding(48)
        .into()
}

fn bar_style(theme: &iced::Theme) -> container::Style {
    let palette = theme.extended_palette();
    let mut background = palette.background.base.color;
    background.a = 0.85;
    container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(palette.background.base.text),
        ..container::Style::default()
    }
}

fn card_style(theme: &iced::Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        text_color: Some(palette.background.base.text),
        border: Border {
            color: palette.background.strong.color,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}
