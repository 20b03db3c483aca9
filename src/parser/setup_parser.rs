//! Parser for the versioned SETUP structure
//!
//! Only a stable subset of the structure is kept. Everything else is skipped
//! by width, so the byte counts below have to track the vendor layout exactly.

use tracing::{debug, warn};
use winnow::{
    Parser,
    binary::{le_u16, le_u32},
    error::ContextError,
    token::take,
};

use super::cursor::ByteCursor;
use crate::error::{Result, StructuralWarning};
use crate::types::setup::Setup;
use crate::utils::{SETUP_FIELDS_OFFSET, SETUP_LAYOUT_LENGTH, SETUP_MARK_OFFSET, setup_read_length};

/// Expected setup marker
pub const SETUP_MARK: &[u8; 2] = b"ST";

// Widths of skipped runs, named after the first field they cover.
/// EDRShutter16
const SKIP_EDR_SHUTTER16: usize = 2;
/// Saturation(l) AutoExposure(B) AutoExpLevel(I), four 4-byte BOOLs, Counter(I)
const SKIP_SATURATION: usize = 4 + 1 + 4 + 4 + 4 + 4;
/// Deprecated Shutter and PostTrigger-era fields (2I)
const SKIP_DEPRECATED_SHUTTER: usize = 8;
/// FrameDelay(I) and a 4-byte BOOL
const SKIP_FRAME_DELAY: usize = 4 + 4;
/// Timezone, viewer and colour settings: `l I 3l 3I 4I 8f l 2f`
const SKIP_TIMEZONE: usize = 4 + 4 + 12 + 12 + 16 + 32 + 4 + 8;
/// Conv8Min through MCPercent: `2I 30l 3I 4? 2I 16l 32I l 64f`
const SKIP_CONV8: usize = 8 + 120 + 12 + 4 + 8 + 64 + 128 + 4 + 256;
/// Unused option words (8I)
const SKIP_OPTIONS: usize = 32;
/// Sidestamped image offsets (4I)
const SKIP_SIDESTAMP: usize = 16;
/// NUL-padded free text
pub const DESCRIPTION_LENGTH: usize = 4096;

fn skip<'a>(n: usize) -> impl Parser<&'a [u8], (), ContextError> {
    take(n).void()
}

/// Strips trailing NUL padding and decodes the rest as (lossy) UTF-8
fn padded_text(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Unpacks the retained fields from ImWidth to the end of Description.
fn setup_fields<'a>(
    mark: [u8; 2],
    declared_length: u16,
) -> impl Parser<&'a [u8], Setup, ContextError> {
    move |input: &mut &'a [u8]| -> std::result::Result<Setup, ContextError> {
        let im_width = le_u16.parse_next(input)?;
        let im_height = le_u16.parse_next(input)?;
        skip(SKIP_EDR_SHUTTER16).parse_next(input)?;
        let serial = le_u32.parse_next(input)?;
        skip(SKIP_SATURATION).parse_next(input)?;
        let frame_rate = le_u32.parse_next(input)?;
        skip(SKIP_DEPRECATED_SHUTTER).parse_next(input)?;
        let post_trigger = le_u32.parse_next(input)?;
        skip(SKIP_FRAME_DELAY).parse_next(input)?;
        let camera_version = le_u32.parse_next(input)?;
        let firmware_version = le_u32.parse_next(input)?;
        let software_version = le_u32.parse_next(input)?;
        skip(SKIP_TIMEZONE).parse_next(input)?;
        let real_bpp = le_u32.parse_next(input)?;

        skip(SKIP_CONV8).parse_next(input)?;

        let ci_calib = le_u32.parse_next(input)?;
        let calib_width = le_u32.parse_next(input)?;
        let calib_height = le_u32.parse_next(input)?;
        let calib_rate = le_u32.parse_next(input)?;
        let calib_exp = le_u32.parse_next(input)?;
        let calib_edr = le_u32.parse_next(input)?;
        let calib_temp = le_u32.parse_next(input)?;
        skip(SKIP_OPTIONS).parse_next(input)?;
        let sensor = le_u32.parse_next(input)?;
        let shutter_ns = le_u32.parse_next(input)?;
        let edr_shutter_ns = le_u32.parse_next(input)?;
        let frame_delay_ns = le_u32.parse_next(input)?;
        skip(SKIP_SIDESTAMP).parse_next(input)?;
        let description = take(DESCRIPTION_LENGTH).parse_next(input)?;

        Ok(Setup::builder()
            .mark(mark)
            .declared_length(declared_length)
            .im_width(im_width)
            .im_height(im_height)
            .serial(serial)
            .frame_rate(frame_rate)
            .post_trigger(post_trigger)
            .camera_version(camera_version)
            .firmware_version(firmware_version)
            .software_version(software_version)
            .real_bpp(real_bpp)
            .ci_calib(ci_calib)
            .calib_width(calib_width)
            .calib_height(calib_height)
            .calib_rate(calib_rate)
            .calib_exp(calib_exp)
            .calib_edr(calib_edr)
            .calib_temp(calib_temp)
            .sensor(sensor)
            .shutter_ns(shutter_ns)
            .edr_shutter_ns(edr_shutter_ns)
            .frame_delay_ns(frame_delay_ns)
            .description(padded_text(description))
            .build())
    }
}

/// Decodes the setup structure starting at its marker.
///
/// A wrong marker or a declared length that disagrees with the decoded layout
/// is pushed to `warnings` and decoding carries on with the fixed offsets;
/// fields past such a mismatch may not mean what their names say.
pub fn parse_setup(
    cursor: &mut ByteCursor<'_>,
    warnings: &mut Vec<StructuralWarning>,
) -> Result<Setup> {
    cursor.seek(SETUP_MARK_OFFSET)?;
    let marker = cursor.read(2)?;
    let mark = [marker[0], marker[1]];
    if &mark != SETUP_MARK {
        let warning = StructuralWarning::SetupMarkMismatch { found: mark };
        warn!("{}", warning);
        warnings.push(warning);
    }

    let declared_length = cursor.read_u16()?;
    let declared_read_length = setup_read_length(declared_length);
    if declared_read_length != SETUP_LAYOUT_LENGTH as i64 {
        let warning = StructuralWarning::SetupLengthMismatch {
            declared_read_length,
            layout_length: SETUP_LAYOUT_LENGTH,
        };
        warn!("{}", warning);
        warnings.push(warning);
    }

    cursor.seek(SETUP_FIELDS_OFFSET)?;
    let setup = cursor.decode(SETUP_LAYOUT_LENGTH, setup_fields(mark, declared_length))?;
    debug!(
        width = setup.im_width,
        height = setup.im_height,
        serial = setup.serial,
        frame_rate = setup.frame_rate,
        "decoded setup"
    );
    Ok(setup)
}
