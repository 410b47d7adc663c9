//! Lazy iteration over a pipe reader.

use crate::reader::PipeReader;

/// A lazy, single-pass iterator over the values read from a pipe.
///
/// Each call to `next` performs one blocking [`PipeReader::read`]; the
/// iterator buffers nothing of its own and ends exactly when the reader
/// reports closed. It cannot be restarted.
pub struct PipeIter<T> {
    reader: PipeReader<T>,
}

impl<T> Iterator for PipeIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.reader.read()
    }
}

impl<T> IntoIterator for PipeReader<T> {
    type Item = T;
    type IntoIter = PipeIter<T>;

    fn into_iter(self) -> PipeIter<T> {
        PipeIter { reader: self }
    }
}

#[cfg(test)]
mod tests {
    use crate::pipe::open_bounded;
    use std::thread;

    #[test]
    fn test_iterates_until_writer_closes() {
        let (writer, reader) = open_bounded::<i32>(2).unwrap().split();

        let producer = thread::spawn(move || {
            for i in 0..10 {
                writer.write(i).unwrap();
            }
            writer.close();
        });

        let sum: i32 = reader.into_iter().sum();
        producer.join().unwrap();
        assert_eq!(sum, 45);
    }

    #[test]
    fn test_empty_closed_pipe_yields_nothing() {
        let (writer, reader) = open_bounded::<i32>(2).unwrap().split();
        writer.close();

        assert_eq!(reader.into_iter().count(), 0);
    }

    #[test]
    fn test_collects_in_fifo_order() {
        let (writer, reader) = open_bounded::<i32>(16).unwrap().split();
        for i in 0..5 {
            writer.write(i).unwrap();
        }
        writer.close();

        let values: Vec<i32> = reader.into_iter().collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }
}
