// SkeletonView: Demo screen
//
// A cloud clipped to a circle above a "Hello" label, shown as a shimmering
// skeleton while the configuration says the content is redacted.

use skeleton_render::{Image, Redaction, Text, VStack, ViewExt};
use skeleton_utils::{Config, Rgba};

const CLOUD: [&str; 4] = [
    "    .--.     ",
    " .-(    ).   ",
    "(___.__)__)  ",
    "             ",
];

pub fn content_view(config: &Config) -> Redaction<VStack> {
    VStack::new()
        .spacing(1)
        .child(Image::new(&CLOUD).color(Rgba::rgb(135, 206, 235)).clip_circle())
        .child(Text::new("Hello"))
        .is_redacted(
            config.redacted,
            config.shimmer.active,
            config.shimmer.duration,
            config.shimmer.bounce,
        )
        .mask_style(config.mask)
}
