use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use icons::{ChevronLeft, ChevronRight};
use leptos::prelude::*;
use std::collections::BTreeSet;

/// Pages shown around the current one.
const PAGE_RANGE: u32 = 5;
/// Pages always shown at each end.
const MARGIN: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Windowed page list: both ends, a range around `current`, ellipses for gaps
/// wider than one page.
pub(crate) fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return vec![];
    }
    let current = current.clamp(1, total);

    if total <= PAGE_RANGE + 2 * MARGIN {
        return (1..=total).map(PageItem::Page).collect();
    }

    let mut start = current.saturating_sub(PAGE_RANGE / 2).max(1);
    let mut end = start + PAGE_RANGE - 1;
    if end > total {
        end = total;
        start = total - PAGE_RANGE + 1;
    }

    let mut pages: BTreeSet<u32> = BTreeSet::new();
    pages.extend(1..=MARGIN);
    pages.extend(start..=end);
    pages.extend((total - MARGIN + 1)..=total);

    let mut out = Vec::with_capacity(pages.len() + 2);
    let mut prev: Option<u32> = None;
    for p in pages {
        match prev {
            Some(q) if p == q + 2 => out.push(PageItem::Page(q + 1)),
            Some(q) if p > q + 2 => out.push(PageItem::Ellipsis),
            _ => {}
        }
        out.push(PageItem::Page(p));
        prev = Some(p);
    }
    out
}

#[component]
pub fn Pagination(
    #[prop(into)] page_count: Signal<u32>,
    #[prop(into)] current_page: Signal<u32>,
    #[prop(into)] on_page_change: Callback<u32>,
) -> impl IntoView {
    let go_to = move |p: u32| {
        if p != current_page.get_untracked() && p >= 1 && p <= page_count.get_untracked() {
            on_page_change.run(p);
        }
    };

    view! {
        <nav class="flex items-center gap-1" aria-label="Pagination">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Previous page"
                attr:disabled=move || current_page.get() <= 1
                on:click=move |_| go_to(current_page.get_untracked().saturating_sub(1))
            >
                <ChevronLeft />
            </Button>

            {move || {
                let current = current_page.get();
                page_items(current, page_count.get())
                    .into_iter()
                    .map(|item| match item {
                        PageItem::Page(p) => {
                            let variant = if p == current {
                                ButtonVariant::Default
                            } else {
                                ButtonVariant::Ghost
                            };
                            view! {
                                <Button
                                    variant=variant
                                    size=ButtonSize::Sm
                                    on:click=move |_| go_to(p)
                                >
                                    {p.to_string()}
                                </Button>
                            }
                            .into_any()
                        }
                        PageItem::Ellipsis => {
                            view! { <span class="px-2 text-muted-foreground">"…"</span> }.into_any()
                        }
                    })
                    .collect_view()
            }}

            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Next page"
                attr:disabled=move || current_page.get() >= page_count.get()
                on:click=move |_| go_to(current_page.get_untracked().saturating_add(1))
            >
                <ChevronRight />
            </Button>
        </nav>
    }
}
