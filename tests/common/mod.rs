//! Synthetic cine containers for integration tests

#![allow(dead_code)]

/// Absolute offset of ImWidth
const FIELDS: usize = 821;

/// Writes a minimal but complete container following the fixed layout.
#[derive(Debug, Clone)]
pub struct SyntheticCine {
    pub width: u16,
    pub height: u16,
    pub bit_count: u16,
    pub trigger: (u32, u32),
    pub setup_mark: [u8; 2],
    pub setup_length: u16,
    pub description: String,
    pub blocks: Vec<Vec<u8>>,
    pub annotation: Vec<u8>,
    pub frames: Vec<Vec<u8>>,
    /// Added to the real start of the frame-offset table when writing
    /// `OffImageOffsets`
    pub off_image_offsets_delta: i64,
}

impl SyntheticCine {
    pub fn new(width: u16, height: u16, bit_count: u16) -> Self {
        Self {
            width,
            height,
            bit_count,
            trigger: (0, 1_300_000_000),
            setup_mark: *b"ST",
            setup_length: 6904,
            description: String::new(),
            blocks: Vec::new(),
            annotation: b"2012-01-08 12:00:00".to_vec(),
            frames: Vec::new(),
            off_image_offsets_delta: 0,
        }
    }

    pub fn frame_u8(mut self, pixels: &[u8]) -> Self {
        self.frames.push(pixels.to_vec());
        self
    }

    pub fn frame_u16(mut self, pixels: &[u16]) -> Self {
        self.frames
            .push(pixels.iter().flat_map(|p| p.to_le_bytes()).collect());
        self
    }

    pub fn block(mut self, code: u16, payload: &[u8]) -> Self {
        let mut block = Vec::with_capacity(payload.len() + 8);
        block.extend_from_slice(&(payload.len() as u32 + 8).to_le_bytes());
        block.extend_from_slice(&code.to_le_bytes());
        block.extend_from_slice(&1u16.to_le_bytes());
        block.extend_from_slice(payload);
        self.blocks.push(block);
        self
    }

    pub fn time_block(self, times: &[(u32, u32)]) -> Self {
        let payload: Vec<u8> = times
            .iter()
            .flat_map(|&(fraction, seconds)| {
                fraction
                    .to_le_bytes()
                    .into_iter()
                    .chain(seconds.to_le_bytes())
            })
            .collect();
        self.block(1002, &payload)
    }

    pub fn exposure_block(self, fractions: &[u32]) -> Self {
        let payload: Vec<u8> = fractions.iter().flat_map(|f| f.to_le_bytes()).collect();
        self.block(1003, &payload)
    }

    pub fn build(&self) -> Vec<u8> {
        let setup_end = 84 + self.setup_length as usize;
        let mut data = vec![0u8; setup_end.max(FIELDS + 4955)];

        // tagged blocks, then the offset table
        for block in &self.blocks {
            data.extend_from_slice(block);
        }
        let table_start = data.len();
        let image_count = self.frames.len();
        let mut frame_offset = table_start + image_count * 8;
        for frame in &self.frames {
            data.extend_from_slice(&(frame_offset as u64).to_le_bytes());
            frame_offset += 4 + self.annotation.len() + 4 + frame.len();
        }
        for frame in &self.frames {
            data.extend_from_slice(&(self.annotation.len() as u32 + 8).to_le_bytes());
            data.extend_from_slice(&self.annotation);
            data.extend_from_slice(&(frame.len() as u32).to_le_bytes());
            data.extend_from_slice(frame);
        }

        let off_image_offsets = (table_start as i64 + self.off_image_offsets_delta) as u32;
        let mut header = Writer::new(&mut data, 0);
        header.bytes(b"CI");
        header.u16(44).u16(0).u16(1);
        header.u32(0).u32(image_count as u32).u32(0).u32(image_count as u32);
        header.u32(44).u32(84).u32(off_image_offsets);
        header.u32(self.trigger.0).u32(self.trigger.1);

        let pixels = u32::from(self.width) * u32::from(self.height);
        let mut bitmap = Writer::new(&mut data, 44);
        bitmap.u32(40);
        bitmap.u32(u32::from(self.width)).u32(u32::from(self.height));
        bitmap.u16(1).u16(self.bit_count);
        bitmap.u32(0).u32(pixels * u32::from(self.bit_count / 8));
        bitmap.u32(0).u32(0).u32(0).u32(0);

        let mut mark = Writer::new(&mut data, 224);
        mark.bytes(&self.setup_mark).u16(self.setup_length);

        let mut setup = Writer::new(&mut data, FIELDS);
        setup.u16(self.width).u16(self.height).skip(2);
        setup.u32(31337).skip(21);
        setup.u32(1000).skip(8);
        setup.u32(10).skip(8);
        setup.u32(7001).u32(705).u32(717).skip(92);
        setup.u32(12).skip(604);
        for calib in 1..=7 {
            setup.u32(calib);
        }
        setup.skip(32);
        setup.u32(2).u32(990_000).u32(0).u32(100).skip(16);
        setup.bytes(self.description.as_bytes());

        data
    }
}

struct Writer<'a> {
    data: &'a mut Vec<u8>,
    at: usize,
}

impl<'a> Writer<'a> {
    fn new(data: &'a mut Vec<u8>, at: usize) -> Self {
        Self { data, at }
    }

    fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data[self.at..self.at + bytes.len()].copy_from_slice(bytes);
        self.at += bytes.len();
        self
    }

    fn u16(&mut self, value: u16) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    fn u32(&mut self, value: u32) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    fn skip(&mut self, n: usize) -> &mut Self {
        self.at += n;
        self
    }
}

/// The three-frame 2×2 8-bit recording used across tests
pub fn three_small_frames() -> SyntheticCine {
    SyntheticCine::new(2, 2, 8)
        .frame_u8(&[1, 2, 3, 4])
        .frame_u8(&[5, 6, 7, 8])
        .frame_u8(&[9, 10, 11, 12])
}
