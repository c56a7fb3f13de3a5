use crate::huffman::node::{NodeId, WeightType};

// An entry in the heap.
#[derive(Debug, Copy, Clone)]
pub struct HeapNode {
    pub weight: WeightType,

    // Insertion order. Breaks ties between equal weights so that the earlier node wins.
    pub seq: u32,

    pub node: NodeId,
}

impl HeapNode {
    #[inline]
    fn key(&self) -> (WeightType, u32) {
        (self.weight, self.seq)
    }
}

// Heapify the node at `pos` up to the root.
fn heapify_up(heap: &mut [HeapNode], mut pos: usize) {
    let orig_node = heap[pos];
    let key = orig_node.key();

    while pos > 0 {
        let parent = (pos - 1) >> 1;
        if heap[parent].key() <= key {
            break;
        }
        heap[pos] = heap[parent];
        pos = parent;
    }
    heap[pos] = orig_node;
}

// Replace the head of the heap with `insert_node`.
fn heapify_down(heap: &mut [HeapNode], insert_node: HeapNode) {
    let size = heap.len();
    let key = insert_node.key();
    let mut pos = 0;
    loop {
        let left = (pos << 1) + 1;
        let right = left + 1;

        let smaller = if right < size {
            if heap[left].key() <= heap[right].key() {
                left
            } else {
                right
            }
        } else if left < size {
            left
        } else {
            break;
        };

        if key <= heap[smaller].key() {
            break;
        }
        heap[pos] = heap[smaller];
        pos = smaller;
    }
    heap[pos] = insert_node;
}

/// Min-heap of tree nodes ordered by weight, then by insertion order.
pub struct NodeHeap {
    heap: Vec<HeapNode>,
    next_seq: u32,
}

impl NodeHeap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn push(&mut self, node: NodeId, weight: WeightType) {
        self.heap.push(HeapNode {
            weight,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
        let last = self.heap.len() - 1;
        heapify_up(&mut self.heap, last);
    }

    /// Remove the lowest entry.
    pub fn pop(&mut self) -> Option<HeapNode> {
        let head = *self.heap.first()?;
        let last = self.heap.pop()?;
        if !self.heap.is_empty() {
            heapify_down(&mut self.heap, last);
        }
        Some(head)
    }
}
