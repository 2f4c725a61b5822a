use std::cell::RefCell;

use log::debug;
use yew::prelude::*;

use crate::motion::dom;
use crate::motion::hooks::{use_layout, use_scroll_progress, Layout};
use crate::motion::mapper::{Property, TransformRange};
use crate::motion::progress::{ScrollSpan, TriggerPoint};
use crate::motion::sink::ElementSink;
use crate::motion::trigger::{AnimationState, Continuous};

const PARALLAX_SPAN: ScrollSpan = ScrollSpan::new(TriggerPoint::TOP_BOTTOM, TriggerPoint::BOTTOM_TOP);

pub const LEFT_IMAGE: [TransformRange; 3] = [
    TransformRange::linear(Property::Y, 0.0, -600.0),
    TransformRange::linear(Property::X, 0.0, -60.0),
    TransformRange::linear(Property::Scale, 1.0, 0.8),
];

pub const RIGHT_IMAGE: [TransformRange; 3] = [
    TransformRange::linear(Property::Y, 0.0, 350.0),
    TransformRange::linear(Property::X, 0.0, 50.0),
    TransformRange::linear(Property::Scale, 1.0, 1.1),
];

fn current_layout() -> Layout {
    Layout::from_width(dom::viewport_width().unwrap_or(0.0))
}

#[function_component(Video)]
pub fn video() -> Html {
    let container_ref = use_node_ref();
    let left_ref = use_node_ref();
    let right_ref = use_node_ref();
    let layout = use_layout();

    {
        let container_ref = container_ref.clone();
        let images = RefCell::new([
            Continuous::new(&LEFT_IMAGE, ElementSink::new(left_ref.clone(), "left video image")),
            Continuous::new(&RIGHT_IMAGE, ElementSink::new(right_ref.clone(), "right video image")),
        ]);
        use_scroll_progress(container_ref.clone(), PARALLAX_SPAN, move |p| {
            if !current_layout().is_wide() {
                return;
            }
            let mut images = images.borrow_mut();
            let state = images
                .iter_mut()
                .map(|image| image.update(p))
                .last()
                .unwrap_or(AnimationState::Idle);
            if let Ok(container) = dom::element(&container_ref, "video section") {
                if let Err(e) = container.set_attribute("data-motion", state.as_str()) {
                    debug!("{}", dom::DomError::js("setAttribute", e));
                }
            }
        });
    }

    {
        let images = [
            ElementSink::new(left_ref.clone(), "left video image"),
            ElementSink::new(right_ref.clone(), "right video image"),
        ];
        use_effect_with_deps(
            move |layout| {
                if !layout.is_wide() {
                    debug!("compact layout, clearing video parallax");
                    images.iter().for_each(ElementSink::clear);
                }
                || ()
            },
            layout,
        );
    }

    html! {
        <div ref={container_ref} class="video-section" data-motion="idle">
            <style>
                {r#"
                    .video-section {
                        position: relative;
                        width: 100%;
                        overflow: hidden;
                        height: 70vh;
                    }
                    .video-backdrop {
                        position: absolute;
                        inset: 0;
                        background: white;
                        z-index: 0;
                    }
                    .video-frame {
                        position: relative;
                        width: 100%;
                        height: 70vh;
                        z-index: 10;
                    }
                    .video-frame video {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                    }
                    .video-float {
                        position: absolute;
                        display: none;
                        z-index: 20;
                        will-change: transform;
                    }
                    .video-float img {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                        border-radius: 4px;
                        box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25);
                    }
                    .video-float.left {
                        top: 75%;
                        left: 100px;
                        width: 461px;
                        height: 490px;
                    }
                    .video-float.right {
                        top: calc(100vh - 180px);
                        right: 100px;
                        width: 270px;
                        height: 285px;
                    }
                    @media (min-width: 768px) {
                        .video-section, .video-frame { height: 75vh; }
                    }
                    @media (min-width: 1024px) {
                        .video-section {
                            height: calc(100vh + 500px);
                            min-height: 900px;
                        }
                        .video-frame { height: 100vh; }
                        .video-float { display: block; }
                    }
                    @media (min-width: 1536px) {
                        .video-float.left { left: 250px; }
                        .video-float.right { right: 250px; }
                    }
                "#}
            </style>
            <div class="video-backdrop"></div>
            <div class="video-frame">
                <video autoplay={true} muted={true} loop={true} playsinline={true} preload="auto">
                    <source src="/assets/home/video.mp4" type="video/mp4" />
                </video>
            </div>
            <div ref={left_ref} class="video-float left">
                <img src="/assets/home/video-img-1.webp" alt="Floating left image" />
            </div>
            <div ref={right_ref} class="video-float right">
                <img src="/assets/home/video-img-2.webp" alt="Floating right image" />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::mapper::{map_props, VisualProps};
    use crate::motion::sink::testing::RecordingSink;

    #[test]
    fn images_drift_apart_across_the_section() {
        let left = map_props(VisualProps::default(), &LEFT_IMAGE, 1.0);
        assert_eq!((left.x, left.y, left.scale), (-60.0, -600.0, 0.8));
        let right = map_props(VisualProps::default(), &RIGHT_IMAGE, 1.0);
        assert_eq!((right.x, right.y, right.scale), (50.0, 350.0, 1.1));
        let rest = map_props(VisualProps::default(), &RIGHT_IMAGE, 0.0);
        assert_eq!(rest, VisualProps::default());
    }

    #[test]
    fn parallax_reports_scroll_direction() {
        let mut image = Continuous::new(&LEFT_IMAGE, RecordingSink::default());
        assert_eq!(image.update(0.2), AnimationState::Entering);
        assert_eq!(image.update(0.6), AnimationState::Entering);
        assert_eq!(image.update(0.6), AnimationState::Active);
        assert_eq!(image.update(0.3), AnimationState::Exiting);
        assert_eq!(image.update(1.0), AnimationState::Idle);
    }
}
