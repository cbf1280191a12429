// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The sky model: images and discrete components that together describe the
//! sky brightness, and ways of pulling components out of images.

mod component;
mod error;
mod grid;
mod image;

pub use component::{ComponentType, SkyComponent};
pub use error::SkyModelError;
pub use grid::{CoordinateMapping, ImageGrid};
pub use image::Image;

use log::trace;

use crate::coord::RADec;

/// A collection of images and components. Combining sky models concatenates
/// their contents; nothing is de-duplicated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkyModel {
    pub images: Vec<Image>,
    pub components: Vec<SkyComponent>,
}

impl SkyModel {
    pub fn new() -> SkyModel {
        SkyModel::default()
    }

    pub fn from_image(image: Image) -> SkyModel {
        SkyModel {
            images: vec![image],
            components: vec![],
        }
    }

    pub fn from_component(component: SkyComponent) -> SkyModel {
        SkyModel {
            images: vec![],
            components: vec![component],
        }
    }

    pub fn add_image(mut self, image: Image) -> SkyModel {
        self.images.push(image);
        self
    }

    pub fn add_component(mut self, component: SkyComponent) -> SkyModel {
        self.components.push(component);
        self
    }

    /// Concatenate the images and components of two sky models; `self`'s come
    /// first.
    pub fn combine(mut self, other: SkyModel) -> SkyModel {
        self.images.extend(other.images);
        self.components.extend(other.components);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.components.is_empty()
    }

    pub fn num_images(&self) -> usize {
        self.images.len()
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }
}

/// Read the flux density of every channel at a pixel and make a point
/// component at `direction` from it.
fn component_at_pixel(
    image: &Image,
    direction: RADec,
    x: usize,
    y: usize,
) -> Result<SkyComponent, SkyModelError> {
    let frequencies = (0..image.num_chans())
        .map(|chan| {
            image
                .grid
                .pixel_to_freq(chan)
                .ok_or(SkyModelError::NoFrequency(chan))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let flux = image.data.slice(ndarray::s![.., y, x]).to_owned();
    SkyComponent::point(direction, flux, frequencies)
}

/// Find the brightest pixel in an image (the largest absolute value over all
/// channels and pixels) and make a point component out of it. The
/// component's flux in each channel is the value of that pixel in that
/// channel.
pub fn find_skycomponent(image: &Image) -> Result<SkyComponent, SkyModelError> {
    let (chan, y, x) = image.peak_abs_index().ok_or(SkyModelError::EmptyImage)?;
    let (xf, yf) = (x as f64, y as f64);
    let direction = image
        .grid
        .pixel_to_sky(xf, yf)
        .ok_or(SkyModelError::PixelOffSky { x: xf, y: yf })?;
    trace!("Brightest pixel is ({x}, {y}) in channel {chan}, at {direction}");
    component_at_pixel(image, direction, x, y)
}

/// Make a point component at a sky position by reading the image pixel
/// nearest to it. Fractional pixels are rounded half up.
pub fn fit_skycomponent(image: &Image, direction: RADec) -> Result<SkyComponent, SkyModelError> {
    let (xf, yf) = image
        .grid
        .sky_to_pixel(direction)
        .ok_or(SkyModelError::DirectionBehindImage(direction))?;
    let (x, y) = ((xf + 0.5).floor(), (yf + 0.5).floor());
    let (num_y, num_x) = image.num_pixels();
    if !(x >= 0.0 && y >= 0.0 && x < num_x as f64 && y < num_y as f64) {
        return Err(SkyModelError::PixelOutOfBounds {
            direction,
            x: xf,
            y: yf,
        });
    }
    component_at_pixel(image, direction, x as usize, y as usize)
}
