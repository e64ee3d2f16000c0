use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlImageElement, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config::{remove_local_storage, save_local_storage, ApiConfig, LS_API_KEY, LS_IMAGE_MODEL, LS_TEXT_MODEL};
use crate::crop::{self, CropSelection, PixelCrop};
use crate::data_url;
use crate::download;
use crate::error::AppError;
use crate::gemini;
use crate::install::{self, DeferredInstallPrompt, InstallOutcome};
use crate::prompts::{RealismLevel, LOADING_INTERVAL_MS};
use crate::session::{Session, SessionAction, ViewMode};

// ----------------------------
// Shared styles
// ----------------------------
const PAGE: &str = "min-height: 100vh; background: #111827; color: #e5e7eb; font-family: system-ui;";
const PANEL: &str = "background: #1f2937; border: 1px solid #374151; border-radius: 12px; padding: 20px; \
                     display: flex; flex-direction: column; gap: 18px;";
const OVERLAY: &str = "position: fixed; inset: 0; background: rgba(17,24,39,0.85); z-index: 50; \
                       display: flex; align-items: center; justify-content: center; padding: 16px;";
const LABEL: &str = "display: block; font-weight: 600; font-size: 1.05rem; margin-bottom: 8px;";
const PRIMARY_BUTTON: &str = "padding: 10px 20px; border: none; border-radius: 8px; font-weight: 700; color: white; \
                              background: linear-gradient(90deg, #9333ea, #4f46e5); cursor: pointer;";
const SECONDARY_BUTTON: &str = "padding: 10px 20px; border: none; border-radius: 8px; font-weight: 700; \
                                color: white; background: #4b5563; cursor: pointer;";
const TITLE: &str = "color: #a78bfa; font-weight: 700; text-align: center; margin: 0;";

// ----------------------------
// Upload
// ----------------------------
async fn read_upload(file: &gloo::file::File) -> Result<String, AppError> {
    let url = gloo::file::futures::read_as_data_url(file)
        .await
        .map_err(|e| AppError::FileRead(e.to_string()))?;
    // Only hand the image to the cropper once it actually decodes.
    let img = crop::load_image(&url).await?;
    gloo::console::log!(format!(
        "loaded {} ({}, {}x{})",
        file.name(),
        file.raw_mime_type(),
        img.natural_width(),
        img.natural_height()
    ));
    Ok(url)
}

// ----------------------------
// Crop modal
// ----------------------------
#[derive(Clone, Copy, PartialEq)]
enum DragMode {
    Move,
    Resize,
}

#[derive(Clone, Copy)]
struct Drag {
    mode: DragMode,
    start_x: f64,
    start_y: f64,
    origin: PixelCrop,
    bound_w: f64,
    bound_h: f64,
}

fn displayed_size(img: &HtmlImageElement) -> (f64, f64) {
    (img.width() as f64, img.height() as f64)
}

fn drag_starter(
    mode: DragMode,
    img_ref: NodeRef,
    selection: UseStateHandle<Option<PixelCrop>>,
    drag: Rc<RefCell<Option<Drag>>>,
) -> Callback<PointerEvent> {
    Callback::from(move |e: PointerEvent| {
        e.prevent_default();
        e.stop_propagation();
        let (Some(img), Some(origin)) = (img_ref.cast::<HtmlImageElement>(), *selection) else {
            return;
        };
        let (bound_w, bound_h) = displayed_size(&img);
        if let Some(target) = e.target_dyn_into::<Element>() {
            let _ = target.set_pointer_capture(e.pointer_id());
        }
        *drag.borrow_mut() = Some(Drag {
            mode,
            start_x: e.client_x() as f64,
            start_y: e.client_y() as f64,
            origin,
            bound_w,
            bound_h,
        });
    })
}

#[derive(Properties, PartialEq)]
struct CropModalProps {
    src: String,
    error: Option<String>,
    on_apply: Callback<Result<String, AppError>>,
    on_cancel: Callback<()>,
}

#[function_component(CropModal)]
fn crop_modal(props: &CropModalProps) -> Html {
    let img_ref = use_node_ref();
    let selection = use_state(|| None::<PixelCrop>);
    let drag = use_mut_ref(|| None::<Drag>);

    let on_image_load = {
        let img_ref = img_ref.clone();
        let selection = selection.clone();
        Callback::from(move |_: Event| {
            if let Some(img) = img_ref.cast::<HtmlImageElement>() {
                let (w, h) = displayed_size(&img);
                selection.set(CropSelection::centered_square(w, h).map(|s| s.to_pixels(w, h)));
            }
        })
    };

    let on_pointer_move = {
        let selection = selection.clone();
        let drag = drag.clone();
        Callback::from(move |e: PointerEvent| {
            let Some(d) = *drag.borrow() else {
                return;
            };
            let dx = e.client_x() as f64 - d.start_x;
            let dy = e.client_y() as f64 - d.start_y;
            let next = match d.mode {
                DragMode::Move => d.origin.moved(dx, dy, d.bound_w, d.bound_h),
                DragMode::Resize => d.origin.resized_square(dx, dy, d.bound_w, d.bound_h),
            };
            selection.set(Some(next));
        })
    };

    let on_pointer_end = {
        let drag = drag.clone();
        Callback::from(move |_: PointerEvent| {
            drag.borrow_mut().take();
        })
    };

    let on_apply = {
        let img_ref = img_ref.clone();
        let selection = selection.clone();
        let on_apply = props.on_apply.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(crop) = (*selection).filter(PixelCrop::is_applicable) else {
                return;
            };
            let result = match img_ref.cast::<HtmlImageElement>() {
                Some(img) => crop::crop_image(&img, &crop, crop::device_pixel_ratio()),
                None => Err(AppError::RenderContext("crop image not mounted".into())),
            };
            if result.is_ok() {
                gloo::console::log!(format!("crop applied: {crop}"));
            }
            on_apply.emit(result);
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let can_apply = selection.map(|c| c.is_applicable()).unwrap_or(false);

    html! {
        <div style={OVERLAY}>
            <div style="width: 100%; max-width: 900px; background: #1f2937; border: 1px solid #374151; border-radius: 12px; padding: 24px; display: flex; flex-direction: column; gap: 16px;">
                <h2 style={TITLE}>{"Crop Your Image"}</h2>
                <p style="text-align: center; opacity: 0.75; margin: 0;">
                    {"Drag and resize the box to select the area you want to keep."}
                </p>

                if let Some(err) = props.error.clone() {
                    <div role="alert" style="padding: 10px; background: rgba(127,29,29,0.5); border: 1px solid #b91c1c; border-radius: 8px; color: #fca5a5; text-align: center;">
                        {err}
                    </div>
                }

                <div style="display: flex; justify-content: center; background: rgba(17,24,39,0.5); padding: 16px; border-radius: 8px;">
                    <div
                        style="position: relative; display: inline-block; overflow: hidden; user-select: none; touch-action: none; line-height: 0;"
                        onpointermove={on_pointer_move}
                        onpointerup={on_pointer_end.clone()}
                        onpointercancel={on_pointer_end}
                    >
                        <img
                            ref={img_ref.clone()}
                            src={props.src.clone()}
                            alt="To crop"
                            draggable="false"
                            onload={on_image_load}
                            style="display: block; max-height: 60vh; max-width: 100%;"
                        />
                        if let Some(c) = *selection {
                            <div
                                style={format!(
                                    "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
                                     box-sizing: border-box; border: 2px dashed #a78bfa; cursor: move; \
                                     box-shadow: 0 0 0 9999px rgba(0,0,0,0.55);",
                                    c.x, c.y, c.width, c.height
                                )}
                                onpointerdown={drag_starter(DragMode::Move, img_ref.clone(), selection.clone(), drag.clone())}
                            >
                                <div
                                    style="position: absolute; right: -7px; bottom: -7px; width: 14px; height: 14px; background: #a78bfa; border-radius: 3px; cursor: nwse-resize;"
                                    onpointerdown={drag_starter(DragMode::Resize, img_ref.clone(), selection.clone(), drag.clone())}
                                />
                            </div>
                        }
                    </div>
                </div>

                <div style="display: flex; justify-content: center; gap: 16px;">
                    <button style={SECONDARY_BUTTON} onclick={on_cancel}>{"Cancel"}</button>
                    <button style={PRIMARY_BUTTON} onclick={on_apply} disabled={!can_apply}>{"Apply Crop"}</button>
                </div>
            </div>
        </div>
    }
}

// ----------------------------
// Info modal
// ----------------------------
#[derive(Properties, PartialEq)]
struct InfoModalProps {
    on_close: Callback<()>,
}

#[function_component(InfoModal)]
fn info_modal(props: &InfoModalProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    // Clicks inside the panel must not reach the backdrop.
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div style={OVERLAY} onclick={close.clone()}>
            <div
                style="position: relative; width: 100%; max-width: 680px; max-height: 80vh; overflow-y: auto; background: #1f2937; border: 1px solid #374151; border-radius: 12px; padding: 24px;"
                onclick={keep_open}
            >
                <button
                    aria-label="Close"
                    style="position: absolute; top: 12px; right: 12px; background: none; border: none; color: #9ca3af; font-size: 1.4rem; cursor: pointer;"
                    onclick={close}
                >{"×"}</button>
                <h2 style={TITLE}>{"About Dreamscape AI"}</h2>
                <p>{"Dreamscape AI swaps the background of your photo for any scene you can describe. \
                     The AI separates you from the original picture, generates the new surroundings \
                     and blends both with matching lighting, shadows and perspective."}</p>
                <h3 style="color: #c4b5fd;">{"How it works"}</h3>
                <ul>
                    <li><b>{"Upload your photo: "}</b>{"pick any PNG, JPG or WEBP picture and crop it if you like."}</li>
                    <li><b>{"Describe your dream scene: "}</b>{"\"a cyberpunk city at night\", \"an ancient misty forest with glowing fungi\"..."}</li>
                    <li><b>{"Generate: "}</b>{"choose a realism level and let the AI build the new background."}</li>
                </ul>
                <h3 style="color: #c4b5fd;">{"Realism levels"}</h3>
                <ul>
                    <li><b>{"Standard: "}</b>{"a quick, clean background swap."}</li>
                    <li><b>{"Enhanced: "}</b>{"also matches lighting direction and basic shadows."}</li>
                    <li><b>{"Ultra: "}</b>{"a full compositing pass with relighting, color grading and film grain."}</li>
                </ul>
                <p style="text-align: center; opacity: 0.7;">{"Stop just taking photos – start creating entire worlds."}</p>
            </div>
        </div>
    }
}

// ----------------------------
// Settings
// ----------------------------
#[derive(Properties, PartialEq)]
struct SettingsPanelProps {
    config: ApiConfig,
    on_change: Callback<ApiConfig>,
}

#[function_component(SettingsPanel)]
fn settings_panel(props: &SettingsPanelProps) -> Html {
    // Every edit is remembered immediately; the effective config is re-read
    // so cleared fields fall back to their defaults.
    let field = |key: &'static str| {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let v = e.target_unchecked_into::<HtmlInputElement>().value();
            save_local_storage(key, &v);
            on_change.emit(ApiConfig::load());
        })
    };

    let clear_saved_key = {
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            remove_local_storage(LS_API_KEY);
            on_change.emit(ApiConfig::load());
        })
    };

    let input_style = "width: 100%; padding: 8px; background: #374151; color: inherit; border: 1px solid #4b5563; border-radius: 6px;";

    html! {
        <div style={format!("{PANEL} max-width: 1200px; margin: 16px auto 0;")}>
            <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 12px;">
                <div>
                    <label style={LABEL}>{"Gemini API Key"}</label>
                    <input
                        type="password"
                        style={input_style}
                        value={props.config.api_key.clone()}
                        placeholder="Paste once, it is remembered in this browser"
                        oninput={field(LS_API_KEY)}
                    />
                </div>
                <div>
                    <label style={LABEL}>{"Image model"}</label>
                    <input style={input_style} value={props.config.image_model.clone()} oninput={field(LS_IMAGE_MODEL)} />
                </div>
                <div>
                    <label style={LABEL}>{"Text model"}</label>
                    <input style={input_style} value={props.config.text_model.clone()} oninput={field(LS_TEXT_MODEL)} />
                </div>
            </div>
            <div>
                <button style={SECONDARY_BUTTON} onclick={clear_saved_key}>{"Clear saved key"}</button>
            </div>
        </div>
    }
}

// ----------------------------
// App
// ----------------------------
#[function_component(App)]
pub fn app() -> Html {
    let session = use_reducer(Session::default);
    let config = use_state(ApiConfig::load);
    let install_prompt = use_state(|| None::<DeferredInstallPrompt>);
    let has_api_key = config.has_api_key();
    let show_settings = use_state(move || !has_api_key);
    let upload_counter = use_mut_ref(|| 0u64);

    {
        let install_prompt = install_prompt.clone();
        use_effect_with((), move |_| {
            let listener =
                install::listen_for_install_prompt(move |event| install_prompt.set(Some(event)));
            move || drop(listener)
        });
    }

    {
        let session = session.clone();
        use_effect_with(session.generating, move |generating| {
            let ticker = generating.then(|| {
                Interval::new(LOADING_INTERVAL_MS, move || {
                    session.dispatch(SessionAction::LoadingTick)
                })
            });
            move || drop(ticker)
        });
    }

    let on_file_change = {
        let session = session.clone();
        let upload_counter = upload_counter.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let file = gloo::file::File::from(file);
            let seq = {
                let mut counter = upload_counter.borrow_mut();
                *counter += 1;
                *counter
            };
            session.dispatch(SessionAction::UploadStarted {
                seq,
                file_name: file.name(),
            });

            let mime = file.raw_mime_type();
            if !data_url::is_accepted_upload(&mime) {
                gloo::console::warn!("rejected upload", file.name(), mime.clone());
                session.dispatch(SessionAction::UploadFailed {
                    seq,
                    error: AppError::UnsupportedFileType(mime),
                });
                return;
            }

            let session = session.clone();
            spawn_local(async move {
                match read_upload(&file).await {
                    Ok(data_url) => session.dispatch(SessionAction::UploadLoaded { seq, data_url }),
                    Err(error) => {
                        gloo::console::error!("upload failed", error.to_string());
                        session.dispatch(SessionAction::UploadFailed { seq, error });
                    }
                }
            });
        })
    };

    let on_crop_apply = {
        let session = session.clone();
        Callback::from(move |result: Result<String, AppError>| match result {
            Ok(url) => session.dispatch(SessionAction::ApplyCrop(url)),
            Err(error) => {
                gloo::console::error!("crop failed", error.to_string());
                session.dispatch(SessionAction::CropFailed(error));
            }
        })
    };

    let on_crop_cancel = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(SessionAction::CancelCrop))
    };

    let on_recrop = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.dispatch(SessionAction::Recrop))
    };

    let on_prompt_input = {
        let session = session.clone();
        Callback::from(move |e: InputEvent| {
            let v = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            session.dispatch(SessionAction::SetPrompt(v));
        })
    };

    let on_enhance = {
        let session = session.clone();
        let config = config.clone();
        Callback::from(move |_: MouseEvent| {
            if !session.can_enhance() {
                return;
            }
            let short_text = session.prompt.clone();
            session.dispatch(SessionAction::EnhanceStarted);

            let config = (*config).clone();
            let session = session.clone();
            spawn_local(async move {
                let result = gemini::enhance_prompt(&config, &short_text).await;
                match &result {
                    Ok(_) => gloo::console::log!("prompt enhanced"),
                    Err(e) => gloo::console::error!("enhance failed", e.to_string()),
                }
                session.dispatch(SessionAction::EnhanceFinished(result));
            });
        })
    };

    let on_generate = {
        let session = session.clone();
        let config = config.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(job) = session.generation_job() else {
                return;
            };
            session.dispatch(SessionAction::GenerationStarted);
            gloo::console::log!("generating", job.level.name());

            let config = (*config).clone();
            let session = session.clone();
            spawn_local(async move {
                let result =
                    gemini::generate_background(&config, &job.image, &job.prompt, job.level).await;
                match &result {
                    Ok(_) => gloo::console::log!("generation finished"),
                    Err(e) => gloo::console::error!("generation failed", e.to_string()),
                }
                session.dispatch(SessionAction::GenerationFinished(result));
            });
        })
    };

    let on_download = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(url) = session.generated.clone() else {
                return;
            };
            let filename = session.download_filename();
            match download::trigger_download(&url, &filename) {
                Ok(()) => gloo::console::log!("downloaded", filename),
                Err(e) => gloo::console::error!("download failed", e),
            }
        })
    };

    let on_install = {
        let install_prompt = install_prompt.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(event) = (*install_prompt).clone() else {
                return;
            };
            let install_prompt = install_prompt.clone();
            spawn_local(async move {
                match event.prompt().await {
                    Ok(InstallOutcome::Accepted) => gloo::console::log!("User accepted the install prompt"),
                    Ok(InstallOutcome::Dismissed) => gloo::console::log!("User dismissed the install prompt"),
                    Err(e) => gloo::console::warn!(e.to_string()),
                }
                install_prompt.set(None);
            });
        })
    };

    let open_info = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.dispatch(SessionAction::ShowInfo(true)))
    };
    let close_info = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(SessionAction::ShowInfo(false)))
    };
    let toggle_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_: MouseEvent| show_settings.set(!*show_settings))
    };
    let on_config_change = {
        let config = config.clone();
        Callback::from(move |next: ApiConfig| config.set(next))
    };

    let info_modal = if session.info_open {
        html! { <InfoModal on_close={close_info} /> }
    } else {
        html! {}
    };

    if session.mode() == ViewMode::Cropping {
        let src = session.pending_crop.clone().unwrap_or_default();
        return html! {
            <>
                <CropModal
                    src={src}
                    error={session.error.clone()}
                    on_apply={on_crop_apply}
                    on_cancel={on_crop_cancel}
                />
                {info_modal}
            </>
        };
    }

    let header_button = "background: none; border: 1px solid #4b5563; color: #d1d5db; border-radius: 8px; padding: 6px 10px; cursor: pointer;";

    html! {
        <div style={PAGE}>
            <header style="position: relative; padding: 16px; border-bottom: 1px solid #374151; background: rgba(31,41,55,0.5);">
                <h1 style={format!("{TITLE} font-size: 1.8rem;")}>{"Dreamscape AI"}</h1>
                <p style="text-align: center; opacity: 0.7; margin: 4px 0 0;">{"Your Photos, Any Reality."}</p>
                <div style="position: absolute; top: 50%; right: 16px; transform: translateY(-50%); display: flex; gap: 8px;">
                    if install_prompt.is_some() {
                        <button
                            style="background: #4f46e5; border: none; color: white; border-radius: 8px; padding: 6px 12px; font-weight: 600; cursor: pointer;"
                            title="Install Dreamscape AI to your device"
                            aria-label="Install App"
                            onclick={on_install}
                        >{"Install App"}</button>
                    }
                    <button style={header_button} onclick={toggle_settings} aria-label="Settings">{"Settings"}</button>
                    <button style={header_button} onclick={open_info} aria-label="About this app">{"About"}</button>
                </div>
            </header>

            {info_modal}

            if *show_settings {
                <SettingsPanel config={(*config).clone()} on_change={on_config_change} />
            }

            <main style="padding: 24px 16px;">
                <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(420px, 1fr)); gap: 24px; max-width: 1200px; margin: 0 auto;">
                    <div style={PANEL}>
                        <div>
                            <label style={LABEL}>{"1. Upload Your Photo"}</label>
                            <input
                                type="file"
                                accept={data_url::accept_attribute()}
                                aria-label="Upload photo"
                                onchange={on_file_change}
                                style="width: 100%; padding: 24px; border: 2px dashed #4b5563; border-radius: 8px; cursor: pointer;"
                            />
                            <p style="font-size: 0.8rem; opacity: 0.6; margin: 6px 0 0;">{"PNG, JPG, WEBP"}</p>
                        </div>

                        <div>
                            <label style={LABEL}>{"2. Describe the New Background"}</label>
                            <textarea
                                id="prompt"
                                rows="4"
                                placeholder="e.g., a futuristic cityscape at night..."
                                style="width: 100%; padding: 12px; background: #374151; color: inherit; border: 1px solid #4b5563; border-radius: 8px; resize: none; box-sizing: border-box;"
                                value={session.prompt.clone()}
                                oninput={on_prompt_input}
                            />
                            <button
                                style="margin-top: 8px; padding: 6px 12px; background: #4f46e5; color: white; border: none; border-radius: 6px; font-weight: 600; cursor: pointer;"
                                title="Let AI enhance your prompt"
                                disabled={!session.can_enhance()}
                                onclick={on_enhance}
                            >
                                { if session.enhancing { "Thinking…" } else { "Get Ideas" } }
                            </button>
                        </div>

                        <div>
                            <label style={LABEL}>{"3. Choose Realism Level"}</label>
                            <div style="display: grid; grid-template-columns: repeat(3, 1fr); gap: 8px;">
                                { for RealismLevel::ALL.iter().map(|&level| {
                                    let selected = session.level == level;
                                    let onclick = {
                                        let session = session.clone();
                                        Callback::from(move |_: MouseEvent| session.dispatch(SessionAction::SetLevel(level)))
                                    };
                                    let style = if selected {
                                        "padding: 12px; border-radius: 8px; border: 2px solid #c084fc; background: #9333ea; color: white; font-weight: 600; cursor: pointer;"
                                    } else {
                                        "padding: 12px; border-radius: 8px; border: 2px solid #4b5563; background: #374151; color: inherit; font-weight: 600; cursor: pointer;"
                                    };
                                    html! { <button style={style} onclick={onclick}>{level.name()}</button> }
                                }) }
                            </div>
                        </div>

                        <button
                            style={format!("{PRIMARY_BUTTON} width: 100%; padding: 14px;")}
                            disabled={!session.can_generate()}
                            onclick={on_generate}
                        >
                            { if session.generating { "Generating..." } else { "Generate" } }
                        </button>
                    </div>

                    <div style={format!("{PANEL} min-height: 400px;")}>
                        <h2 style="text-align: center; margin: 0; font-size: 1.1rem;">{"Results"}</h2>

                        if let Some(err) = session.error.clone() {
                            <div role="alert" style="padding: 12px; background: rgba(127,29,29,0.5); border: 1px solid #b91c1c; border-radius: 8px; color: #fca5a5; text-align: center;">
                                {err}
                            </div>
                        }

                        <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 16px;">
                            <div style="position: relative; background: rgba(55,65,81,0.5); border-radius: 8px; padding: 8px; text-align: center;">
                                <h3 style="margin: 0 0 8px; font-size: 0.95rem; opacity: 0.7;">{"Original"}</h3>
                                if let Some(original) = session.original.clone() {
                                    <img src={original} alt="Original upload" style="width: 100%; max-height: 24rem; object-fit: contain; border-radius: 6px;" />
                                    <button
                                        title="Crop Image"
                                        style="position: absolute; top: 8px; right: 8px; background: rgba(17,24,39,0.6); color: white; border: none; border-radius: 999px; padding: 6px 10px; cursor: pointer;"
                                        onclick={on_recrop}
                                    >{"Crop"}</button>
                                } else {
                                    <div style="height: 16rem; display: flex; align-items: center; justify-content: center; background: #374151; border-radius: 6px; opacity: 0.6;">
                                        {"Upload an image to start"}
                                    </div>
                                }
                            </div>

                            <div style="background: rgba(55,65,81,0.5); border-radius: 8px; padding: 8px; text-align: center;">
                                <h3 style="margin: 0 0 8px; font-size: 0.95rem; opacity: 0.7;">{"Generated"}</h3>
                                <div style="min-height: 16rem; display: flex; flex-direction: column; align-items: center; justify-content: center; background: #374151; border-radius: 6px;">
                                    if session.generating {
                                        <div aria-live="polite" style="padding: 16px;">
                                            <p style="color: #d8b4fe; font-weight: 600; margin: 0;">{session.loading_message()}</p>
                                            <p style="font-size: 0.85rem; opacity: 0.6;">{"This may take a moment."}</p>
                                        </div>
                                    } else if let Some(generated) = session.generated.clone() {
                                        <img src={generated} alt="AI Generated" style="width: 100%; max-height: 24rem; object-fit: contain; border-radius: 6px;" />
                                    } else {
                                        <p style="opacity: 0.6; padding: 0 16px;">{"Your new image will appear here"}</p>
                                    }
                                </div>
                                if session.can_download() {
                                    <button
                                        style="margin-top: 8px; width: 100%; padding: 8px 16px; border: none; border-radius: 8px; font-weight: 700; color: white; background: linear-gradient(90deg, #22c55e, #14b8a6); cursor: pointer;"
                                        onclick={on_download}
                                    >{"Download Image"}</button>
                                }
                            </div>
                        </div>
                    </div>
                </div>
            </main>
        </div>
    }
}
