use std::rc::Rc;

use cafe_diary_shared::format::ResultFields;
use cafe_diary_shared::page::{
    FIELD_CAFE_NAME, FIELD_MENU_ITEMS, FIELD_TOTAL_PRICE, FIELD_VISIT_DATE,
    FILE_INPUT_ID, LOADING_INDICATOR_ID, PREVIEW_ID, RECEIPT_FIELD, RECEIPT_FORM_ID,
    RESULTS_SECTION_ID,
};
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::api::HttpReceiptApi;
use crate::components::alert_stack::AlertStack;
use crate::dom;
use crate::map::kakao::KakaoSdk;
use crate::map::SharedMap;
use crate::upload::banner::{BannerKind, BannerStack};
use crate::upload::{ReceiptUploadController, ReceiptView};

/// Signals backing the receipt form; writing them re-renders the form.
#[derive(Clone, Copy)]
struct FormState {
    preview: Signal<Option<String>>,
    loading: Signal<bool>,
    results: Signal<Option<ResultFields>>,
    banners: Signal<BannerStack>,
}

impl ReceiptView for FormState {
    fn show_preview(&self, data_url: String) {
        let mut preview = self.preview;
        preview.set(Some(data_url));
    }

    fn set_loading(&self, visible: bool) {
        let mut loading = self.loading;
        loading.set(visible);
    }

    fn show_results(&self, fields: ResultFields) {
        let mut results = self.results;
        results.set(Some(fields));
    }

    fn show_banner(&self, kind: BannerKind, message: String) -> u64 {
        let mut banners = self.banners;
        let id = banners.write().push(kind, message);
        id
    }

    fn schedule_dismiss(&self, id: u64, delay_ms: u32) {
        let mut banners = self.banners;
        spawn(async move {
            TimeoutFuture::new(delay_ms).await;
            banners.write().dismiss(id);
        });
    }

    fn schedule_reload(&self, delay_ms: u32) {
        dom::reload_after(delay_ms);
    }
}

type UploadController = ReceiptUploadController<HttpReceiptApi, FormState, SharedMap<KakaoSdk>>;

fn field_label(field_id: &str) -> &'static str {
    match field_id {
        FIELD_CAFE_NAME => "카페 이름",
        FIELD_VISIT_DATE => "방문 일시",
        FIELD_MENU_ITEMS => "메뉴",
        FIELD_TOTAL_PRICE => "총 금액",
        _ => "",
    }
}

#[component]
pub fn ReceiptForm(map: Option<SharedMap<KakaoSdk>>) -> Element {
    let preview = use_signal(|| None::<String>);
    let loading = use_signal(|| false);
    let results = use_signal(|| None::<ResultFields>);
    let banners = use_signal(BannerStack::default);

    let state = FormState {
        preview,
        loading,
        results,
        banners,
    };
    let controller: Rc<UploadController> = use_hook(move || {
        Rc::new(ReceiptUploadController::new(
            HttpReceiptApi::default(),
            state,
            map,
        ))
    });

    let on_file_change = {
        let controller = controller.clone();
        move |_: Event<FormData>| {
            let controller = controller.clone();
            spawn(async move {
                if let Some(file) = dom::read_selected_file(FILE_INPUT_ID).await {
                    controller.select_file(file);
                }
            });
        }
    };

    let on_submit = {
        let controller = controller.clone();
        move |evt: Event<FormData>| {
            evt.prevent_default();
            let controller = controller.clone();
            spawn(async move {
                controller.submit().await;
            });
        }
    };

    let preview_src = preview.read().clone();
    let preview_style = if preview_src.is_some() {
        "display: block;"
    } else {
        "display: none;"
    };
    let loading_style = if *loading.read() {
        "display: block;"
    } else {
        "display: none;"
    };
    let fields = results.read().clone();
    let results_style = if fields.is_some() {
        "display: block;"
    } else {
        "display: none;"
    };
    let fields = fields.unwrap_or_default();

    rsx! {
        div { class: "container receipt-container",
            AlertStack { banners: banners }

            form {
                id: RECEIPT_FORM_ID,
                class: "panel",
                onsubmit: on_submit,

                h3 { "영수증 업로드" }
                input {
                    id: FILE_INPUT_ID,
                    r#type: "file",
                    name: RECEIPT_FIELD,
                    accept: "image/*",
                    class: "form-control",
                    onchange: on_file_change,
                }
                img {
                    id: PREVIEW_ID,
                    class: "receipt-preview",
                    alt: "영수증 미리보기",
                    src: preview_src.unwrap_or_default(),
                    style: preview_style,
                }
                button { r#type: "submit", class: "btn btn-primary", "영수증 분석" }
                div {
                    id: LOADING_INDICATOR_ID,
                    class: "loading-indicator",
                    style: loading_style,
                    "분석 중..."
                }
            }

            div {
                id: RESULTS_SECTION_ID,
                class: "panel",
                style: results_style,
                h3 { "분석 결과" }
                for (field_id, value) in fields.entries() {
                    div { key: "{field_id}", class: "mb-3",
                        label { r#for: field_id, {field_label(field_id)} }
                        if field_id == FIELD_MENU_ITEMS {
                            textarea { id: field_id, class: "form-control", rows: "4", value: value }
                        } else {
                            input { id: field_id, r#type: "text", class: "form-control", value: value }
                        }
                    }
                }
            }
        }
    }
}
